//! QR code payloads and rendering.
//!
//! Each content kind is turned into the payload string understood by phone
//! scanners (`mailto:`, `smsto:`, `WIFI:`, vCard). Symbol encoding is
//! delegated to the `qrcode` crate; output is SVG or block characters for a
//! terminal.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};
use serde::Serialize;
use tracing::debug;

use crate::color::Rgb;
use crate::error::{Result, ToolkitError};

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ── Content ─────────────────────────────────────────────────────────────────

/// Wi-Fi authentication type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    None,
}

impl WifiEncryption {
    pub fn as_str(self) -> &'static str {
        match self {
            WifiEncryption::Wpa => "WPA",
            WifiEncryption::Wep => "WEP",
            WifiEncryption::None => "None",
        }
    }
}

impl FromStr for WifiEncryption {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WPA" | "WPA2" => Ok(WifiEncryption::Wpa),
            "WEP" => Ok(WifiEncryption::Wep),
            "NONE" | "NOPASS" | "OPEN" => Ok(WifiEncryption::None),
            _ => Err(ToolkitError::QrEncoding(format!(
                "unknown Wi-Fi encryption '{s}'"
            ))),
        }
    }
}

/// What the QR code carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum QrContent {
    Url(String),
    Text(String),
    Email {
        address: String,
        subject: String,
        body: String,
    },
    Sms {
        phone: String,
        message: String,
    },
    Wifi {
        ssid: String,
        password: String,
        encryption: WifiEncryption,
    },
    Contact {
        name: String,
        phone: String,
        email: String,
    },
}

impl QrContent {
    /// Short lowercase name of the content kind (`"url"`, `"wifi"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            QrContent::Url(_) => "url",
            QrContent::Text(_) => "text",
            QrContent::Email { .. } => "email",
            QrContent::Sms { .. } => "sms",
            QrContent::Wifi { .. } => "wifi",
            QrContent::Contact { .. } => "contact",
        }
    }

    /// The string that gets encoded into the symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolkit_engine::qr::QrContent;
    ///
    /// let sms = QrContent::Sms {
    ///     phone: "+15550100".into(),
    ///     message: "on my way".into(),
    /// };
    /// assert_eq!(sms.payload(), "smsto:+15550100:on%20my%20way");
    /// ```
    pub fn payload(&self) -> String {
        match self {
            QrContent::Url(url) => url.clone(),
            QrContent::Text(text) => text.clone(),
            QrContent::Email {
                address,
                subject,
                body,
            } => format!(
                "mailto:{address}?subject={}&body={}",
                uri_component(subject),
                uri_component(body)
            ),
            QrContent::Sms { phone, message } => {
                format!("smsto:{phone}:{}", uri_component(message))
            }
            QrContent::Wifi {
                ssid,
                password,
                encryption,
            } => format!(
                "WIFI:T:{};S:{};P:{};;",
                encryption.as_str(),
                escape_wifi(ssid),
                escape_wifi(password)
            ),
            QrContent::Contact { name, phone, email } => format!(
                "BEGIN:VCARD\nVERSION:3.0\nFN:{name}\nTEL:{phone}\nEMAIL:{email}\nEND:VCARD"
            ),
        }
    }
}

fn uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Backslash-escape the characters that delimit fields in a `WIFI:` payload.
fn escape_wifi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '\\' | ';' | ',' | ':' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

// ── Options ─────────────────────────────────────────────────────────────────

/// Share of codewords that can be lost and still decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ErrorCorrection {
    /// ~7%
    L,
    /// ~15%
    #[default]
    M,
    /// ~25%
    Q,
    /// ~30%
    H,
}

impl ErrorCorrection {
    fn level(self) -> EcLevel {
        match self {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        };
        f.write_str(s)
    }
}

impl FromStr for ErrorCorrection {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(ErrorCorrection::L),
            "M" => Ok(ErrorCorrection::M),
            "Q" => Ok(ErrorCorrection::Q),
            "H" => Ok(ErrorCorrection::H),
            _ => Err(ToolkitError::QrEncoding(format!(
                "error correction must be one of L, M, Q, H; got '{s}'"
            ))),
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QrOptions {
    /// Minimum edge length of the SVG in pixels.
    pub size: u32,
    /// Quiet-zone margin in modules. The renderer draws the standard quiet
    /// zone for any non-zero margin and none for zero.
    pub margin: u32,
    pub dark: Rgb,
    pub light: Rgb,
    pub error_correction: ErrorCorrection,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 200,
            margin: 2,
            dark: Rgb::new(0, 0, 0),
            light: Rgb::new(255, 255, 255),
            error_correction: ErrorCorrection::default(),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────────────

fn encode(content: &QrContent, options: &QrOptions) -> Result<QrCode> {
    let payload = content.payload();
    if payload.trim().is_empty() {
        return Err(ToolkitError::EmptyPayload);
    }
    let code =
        QrCode::with_error_correction_level(payload.as_bytes(), options.error_correction.level())
            .map_err(|e| ToolkitError::QrEncoding(e.to_string()))?;
    debug!(
        kind = content.kind(),
        bytes = payload.len(),
        modules = code.width(),
        "encoded QR symbol"
    );
    Ok(code)
}

/// Render `content` as a standalone SVG document.
///
/// # Errors
///
/// Returns [`ToolkitError::EmptyPayload`] for a blank payload, or
/// [`ToolkitError::QrEncoding`] if the payload does not fit in a symbol.
pub fn render_svg(content: &QrContent, options: &QrOptions) -> Result<String> {
    let code = encode(content, options)?;
    let dark = options.dark.to_hex();
    let light = options.light.to_hex();
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(options.size, options.size)
        .quiet_zone(options.margin > 0)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build())
}

/// Render `content` with Unicode half blocks for display in a terminal.
///
/// # Errors
///
/// Same as [`render_svg`].
pub fn render_text(content: &QrContent, options: &QrOptions) -> Result<String> {
    let code = encode(content, options)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Dark)
        .light_color(unicode::Dense1x2::Light)
        .quiet_zone(options.margin > 0)
        .build())
}

/// Suggested download name, e.g. `qr-code-wifi-1760745600000.svg`.
pub fn file_name(content: &QrContent, timestamp_millis: i64) -> String {
    format!("qr-code-{}-{timestamp_millis}.svg", content.kind())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_and_text_payloads_pass_through() {
        assert_eq!(
            QrContent::Url("https://example.com".into()).payload(),
            "https://example.com"
        );
        assert_eq!(QrContent::Text("Sample text".into()).payload(), "Sample text");
    }

    #[test]
    fn test_email_payload_encodes_components() {
        let email = QrContent::Email {
            address: "me@example.com".into(),
            subject: "Hi & bye".into(),
            body: "Line 1\nLine (2)!".into(),
        };
        assert_eq!(
            email.payload(),
            "mailto:me@example.com?subject=Hi%20%26%20bye&body=Line%201%0ALine%20(2)!"
        );
    }

    #[test]
    fn test_uri_component_matches_browser() {
        assert_eq!(uri_component("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
        assert_eq!(uri_component("é/?#"), "%C3%A9%2F%3F%23");
    }

    #[test]
    fn test_wifi_payload() {
        let wifi = QrContent::Wifi {
            ssid: "Home".into(),
            password: "s3cret".into(),
            encryption: WifiEncryption::Wpa,
        };
        assert_eq!(wifi.payload(), "WIFI:T:WPA;S:Home;P:s3cret;;");
    }

    #[test]
    fn test_wifi_payload_escapes_delimiters() {
        let wifi = QrContent::Wifi {
            ssid: "Cafe;Guest".into(),
            password: "a:b".into(),
            encryption: WifiEncryption::None,
        };
        assert_eq!(wifi.payload(), r"WIFI:T:None;S:Cafe\;Guest;P:a\:b;;");
    }

    #[test]
    fn test_contact_payload_is_vcard() {
        let contact = QrContent::Contact {
            name: "Ada Lovelace".into(),
            phone: "+441234".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(
            contact.payload(),
            "BEGIN:VCARD\nVERSION:3.0\nFN:Ada Lovelace\nTEL:+441234\nEMAIL:ada@example.com\nEND:VCARD"
        );
    }

    #[test]
    fn test_blank_payload_is_error() {
        let err = render_svg(&QrContent::Text("   ".into()), &QrOptions::default()).unwrap_err();
        assert_eq!(err, ToolkitError::EmptyPayload);
    }

    #[test]
    fn test_render_svg_uses_colors() {
        let options = QrOptions {
            dark: Rgb::new(0x11, 0x22, 0x33),
            ..Default::default()
        };
        let svg = render_svg(&QrContent::Url("https://example.com".into()), &options).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#112233"));
        assert!(svg.contains("#ffffff"));
    }

    #[test]
    fn test_render_text_has_rows() {
        let text = render_text(&QrContent::Text("hello".into()), &QrOptions::default()).unwrap();
        assert!(text.lines().count() > 5);
    }

    #[test]
    fn test_oversized_payload_is_error() {
        let huge = QrContent::Text("x".repeat(8000));
        let err = render_svg(&huge, &QrOptions::default()).unwrap_err();
        assert!(matches!(err, ToolkitError::QrEncoding(_)));
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("h".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::H);
        assert!("X".parse::<ErrorCorrection>().is_err());
        assert_eq!("wep".parse::<WifiEncryption>().unwrap(), WifiEncryption::Wep);
        assert_eq!("nopass".parse::<WifiEncryption>().unwrap(), WifiEncryption::None);
    }

    #[test]
    fn test_file_name() {
        let name = file_name(&QrContent::Url("x".into()), 1_760_745_600_000);
        assert_eq!(name, "qr-code-url-1760745600000.svg");
    }
}
