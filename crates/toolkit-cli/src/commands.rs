//! Subcommand handlers.
//!
//! Each handler computes a serializable result with `toolkit_engine` and
//! prints it either as human-readable text or, with `--json`, as JSON.

use std::io::{self, BufRead, Read};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::Local;
use serde::Serialize;
use tracing::{debug, info_span};

use toolkit_engine::age::{
    age_between, born_on, extended_age, validate_birth_date, AgeResult, ExtendedAge,
};
use toolkit_engine::color::{Hsl, Rgb, DEFAULT_COLOR};
use toolkit_engine::emi::{EmiResult, Installment, Loan};
use toolkit_engine::encoding;
use toolkit_engine::json_format::{format_json, validate_json, FormatStyle, EXAMPLE_JSON};
use toolkit_engine::meta::{head_block, MetaTags};
use toolkit_engine::password::{self, PasswordOptions, Strength};
use toolkit_engine::qr::{self, QrContent, QrOptions};
use toolkit_engine::text::{format_thousands, TextStats};
use toolkit_engine::tools::Tool;
use toolkit_engine::typing::TypingSession;
use toolkit_engine::units::{format_fixed, ConverterState, UnitCategory};

use crate::{Commands, QrKind, QrStyle};

pub fn run(command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Age {
            day,
            month,
            year,
            extended,
        } => age(json, day, month, year, extended),
        Commands::Convert {
            category,
            from,
            to,
            list,
            value,
        } => convert(json, category, from, to, list, value),
        Commands::Emi {
            principal,
            rate,
            years,
            schedule,
        } => emi(json, Loan::new(principal, rate, years), schedule),
        Commands::Words { text } => words(json, text),
        Commands::Json {
            input,
            minify,
            check,
            example,
        } => json_cmd(json, input, minify, check, example),
        Commands::Base64 { text, decode } => base64(json, text, decode),
        Commands::Color { color: rgb } => color(json, rgb.unwrap_or(DEFAULT_COLOR)),
        Commands::Password {
            length,
            no_uppercase,
            no_lowercase,
            no_numbers,
            no_symbols,
            count,
        } => {
            let options = PasswordOptions {
                length,
                uppercase: !no_uppercase,
                lowercase: !no_lowercase,
                numbers: !no_numbers,
                symbols: !no_symbols,
            };
            passwords(json, options, count)
        }
        Commands::Typing {
            text,
            typed,
            seconds,
        } => typing(json, text, typed, seconds),
        Commands::Qr { style, content } => qr_cmd(json, style, content),
        Commands::Meta {
            empty,
            set,
            add,
            head,
        } => meta(json, empty, set, add, head),
        Commands::Tools { route } => tools(json, route),
    }
}

// ── Output ──────────────────────────────────────────────────────────────────

/// Print `value` as pretty JSON, or the text produced by `text`.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

/// The positional argument, or all of stdin when it was omitted.
fn arg_or_stdin(arg: Option<String>) -> Result<String> {
    match arg {
        Some(s) => Ok(s),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn plural(n: impl Into<u64>, unit: &str) -> String {
    let n = n.into();
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

// ── Age ─────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct AgeReport {
    age: AgeResult,
    born_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    extended: Option<ExtendedAge>,
}

fn age(json: bool, day: String, month: String, year: String, extended: bool) -> Result<()> {
    let _span = info_span!("age").entered();
    let now = Local::now().naive_local();
    let today = now.date();

    let birth = validate_birth_date(&day, &month, &year, today)?;
    let age = age_between(birth, today)?;
    let report = AgeReport {
        age,
        born_on: born_on(birth),
        extended: if extended {
            Some(extended_age(birth, now)?)
        } else {
            None
        },
    };

    emit(json, &report, |r| {
        let mut out = format!(
            "{}, {}, {}\nBorn on {}",
            plural(r.age.years, "year"),
            plural(r.age.months, "month"),
            plural(r.age.days, "day"),
            r.born_on
        );
        if let Some(ext) = &r.extended {
            out.push_str(&format!(
                "\n\nMonths:  {}\nWeeks:   {}\nDays:    {}\nHours:   {}\nMinutes: {}\nSeconds: {}",
                ext.months, ext.weeks, ext.days, ext.hours, ext.minutes, ext.seconds
            ));
        }
        out
    })
}

// ── Units ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Conversion<'a> {
    category: UnitCategory,
    from: &'a str,
    to: &'a str,
    input: &'a str,
    output: Option<String>,
}

fn convert(
    json: bool,
    category: UnitCategory,
    from: Option<String>,
    to: Option<String>,
    list: bool,
    value: Option<String>,
) -> Result<()> {
    let _span = info_span!("convert", %category).entered();

    if list {
        let units = category.units();
        return emit(json, &units, |units| {
            units
                .iter()
                .map(|u| format!("{:<12} {:<4} {}", u.key, u.symbol, u.name))
                .collect::<Vec<_>>()
                .join("\n")
        });
    }

    let mut state = ConverterState::new(category);
    if let Some(from) = from.as_deref() {
        state.set_from_unit(from)?;
    }
    if let Some(to) = to.as_deref() {
        state.set_to_unit(to)?;
    }
    state.set_input(value.unwrap_or_default());

    let output = state.output();
    debug!(input = state.input(), ?output, "conversion");
    if output.is_none() && !json {
        bail!("'{}' is not a number", state.input());
    }

    let result = Conversion {
        category,
        from: state.from_unit(),
        to: state.to_unit(),
        input: state.input(),
        output,
    };
    emit(json, &result, |r| r.output.clone().unwrap_or_default())
}

// ── EMI ─────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct EmiReport {
    loan: Loan,
    #[serde(flatten)]
    result: EmiResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<Installment>>,
}

fn emi(json: bool, loan: Loan, with_schedule: bool) -> Result<()> {
    let _span = info_span!("emi").entered();
    let report = EmiReport {
        loan,
        result: loan.emi()?,
        schedule: if with_schedule {
            Some(loan.schedule()?)
        } else {
            None
        },
    };

    emit(json, &report, |r| {
        let mut out = format!(
            "Monthly EMI:    {}\nTotal interest: {}\nTotal payment:  {}",
            format_fixed(r.result.monthly_emi, 2),
            format_fixed(r.result.total_interest, 2),
            format_fixed(r.result.total_payment, 2)
        );
        if let Some(rows) = &r.schedule {
            out.push_str("\n\nMonth     Payment   Principal    Interest       Balance");
            for row in rows {
                out.push_str(&format!(
                    "\n{:>5} {:>11.2} {:>11.2} {:>11.2} {:>13.2}",
                    row.month, row.payment, row.principal, row.interest, row.balance
                ));
            }
        }
        out
    })
}

// ── Text ────────────────────────────────────────────────────────────────────

fn words(json: bool, text: Option<String>) -> Result<()> {
    let text = arg_or_stdin(text)?;
    let stats = TextStats::count(&text);
    emit(json, &stats, |s| {
        format!(
            "Words:        {}\nCharacters:   {}\nSentences:    {}\nParagraphs:   {}\nReading time: {} min",
            format_thousands(s.words),
            format_thousands(s.characters),
            format_thousands(s.sentences),
            format_thousands(s.paragraphs),
            s.reading_minutes
        )
    })
}

#[derive(Serialize)]
struct JsonCheck {
    valid: bool,
}

fn json_cmd(
    json: bool,
    input: Option<String>,
    minify: bool,
    check: bool,
    example: bool,
) -> Result<()> {
    let input = if example {
        EXAMPLE_JSON.to_string()
    } else {
        arg_or_stdin(input)?
    };

    if check {
        validate_json(&input)?;
        return emit(json, &JsonCheck { valid: true }, |_| "Valid JSON".to_string());
    }

    let style = if minify {
        FormatStyle::Minified
    } else {
        FormatStyle::Pretty
    };
    // The formatted document is already JSON; --json does not wrap it.
    if let Some(formatted) = format_json(&input, style)? {
        println!("{formatted}");
    }
    Ok(())
}

#[derive(Serialize)]
struct Base64Result {
    input: String,
    output: String,
}

fn base64(json: bool, text: Option<String>, decode: bool) -> Result<()> {
    let input = arg_or_stdin(text)?;
    let output = if decode {
        encoding::decode(&input)?
    } else {
        // A trailing newline from a pipe is not part of the text.
        encoding::encode(input.strip_suffix('\n').unwrap_or(&input))
    };
    emit(json, &Base64Result { input, output }, |r| r.output.clone())
}

// ── Color ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ColorReport {
    hex: String,
    rgb: Rgb,
    hsl: Hsl,
    palette: Vec<String>,
}

fn color(json: bool, rgb: Rgb) -> Result<()> {
    let report = ColorReport {
        hex: rgb.to_hex(),
        rgb,
        hsl: rgb.to_hsl(),
        palette: rgb.palette().iter().map(|c| c.to_hex()).collect(),
    };
    emit(json, &report, |r| {
        format!(
            "HEX: {}\nRGB: {}\nHSL: {}\nPalette: {}",
            r.hex,
            r.rgb.css_rgb(),
            r.hsl,
            r.palette.join(" ")
        )
    })
}

// ── Password ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PasswordReport {
    passwords: Vec<String>,
    strength: u8,
    label: &'static str,
}

fn passwords(json: bool, options: PasswordOptions, count: usize) -> Result<()> {
    let mut rng = rand::thread_rng();
    let passwords = (0..count.max(1))
        .map(|_| password::generate(&options, &mut rng))
        .collect::<toolkit_engine::Result<Vec<_>>>()?;
    let strength = password::strength(&options);
    let report = PasswordReport {
        passwords,
        strength,
        label: Strength::from_score(strength).label(),
    };
    emit(json, &report, |r| {
        format!(
            "{}\nStrength: {} ({}/100)",
            r.passwords.join("\n"),
            r.label,
            r.strength
        )
    })
}

// ── Typing ──────────────────────────────────────────────────────────────────

fn typing(
    json: bool,
    text: Option<String>,
    typed: Option<String>,
    seconds: Option<u64>,
) -> Result<()> {
    let mut session = match text {
        Some(text) => TypingSession::new(text),
        None => TypingSession::random(&mut rand::thread_rng()),
    };

    let stats = match (typed, seconds) {
        (Some(typed), Some(seconds)) => session.input(&typed, seconds),
        _ => {
            eprintln!("Type the following passage and press Enter:\n\n{}\n", session.text());
            let started = Instant::now();
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("failed to read stdin")?;
            let elapsed = started.elapsed().as_secs();
            session.input(line.trim_end_matches(['\r', '\n']), elapsed)
        }
    };

    emit(json, &stats, |s| {
        format!(
            "WPM:      {}\nAccuracy: {}%\nCorrect:  {}\nErrors:   {}{}",
            s.wpm,
            s.accuracy,
            s.correct_chars,
            s.incorrect_chars,
            if s.complete { "" } else { "\n(incomplete)" }
        )
    })
}

// ── QR ──────────────────────────────────────────────────────────────────────

fn qr_content(kind: QrKind) -> QrContent {
    match kind {
        QrKind::Url { url } => QrContent::Url(url),
        QrKind::Text { text } => QrContent::Text(text),
        QrKind::Email {
            address,
            subject,
            body,
        } => QrContent::Email {
            address,
            subject,
            body,
        },
        QrKind::Sms { phone, message } => QrContent::Sms { phone, message },
        QrKind::Wifi {
            ssid,
            password,
            encryption,
        } => QrContent::Wifi {
            ssid,
            password,
            encryption,
        },
        QrKind::Contact { name, phone, email } => QrContent::Contact { name, phone, email },
    }
}

#[derive(Serialize)]
struct QrReport {
    content: QrContent,
    payload: String,
    options: QrOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

fn qr_cmd(json: bool, style: QrStyle, kind: QrKind) -> Result<()> {
    let content = qr_content(kind);
    let _span = info_span!("qr", kind = content.kind()).entered();
    let options = QrOptions {
        size: style.size,
        margin: style.margin,
        dark: style.dark,
        light: style.light,
        error_correction: style.error_correction,
    };

    let path = match style.output {
        Some(path) => Some(path),
        None if style.save => Some(qr::file_name(&content, Local::now().timestamp_millis()).into()),
        None => None,
    };

    let mut file = None;
    if let Some(path) = path {
        let svg = qr::render_svg(&content, &options)?;
        std::fs::write(&path, svg).with_context(|| format!("failed to write {}", path.display()))?;
        file = Some(path.display().to_string());
    } else if !json {
        let rendered = if style.svg {
            qr::render_svg(&content, &options)?
        } else {
            qr::render_text(&content, &options)?
        };
        println!("{rendered}");
        return Ok(());
    } else {
        // Surface encoding errors even when only the payload is printed.
        qr::render_svg(&content, &options)?;
    }

    let report = QrReport {
        payload: content.payload(),
        content,
        options,
        file,
    };
    emit(json, &report, |r| match &r.file {
        Some(file) => format!("Saved {file}"),
        None => r.payload.clone(),
    })
}

// ── Meta ────────────────────────────────────────────────────────────────────

fn meta(
    json: bool,
    empty: bool,
    set: Vec<(String, String)>,
    add: Vec<(String, String)>,
    head: bool,
) -> Result<()> {
    let mut tags = if empty {
        MetaTags::empty()
    } else {
        MetaTags::default()
    };
    for (name, content) in &set {
        if tags.set(name, content) == 0 {
            bail!("no tag named '{name}'; use --add to create it");
        }
    }
    for (name, content) in &add {
        if !tags.add(name, content) {
            bail!("tag name and content must not be empty");
        }
    }

    emit(json, &tags.tags(), |tags| {
        if head {
            head_block(tags)
        } else {
            toolkit_engine::meta::render(tags)
        }
    })
}

// ── Tools ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ToolEntry {
    tool: Tool,
    name: &'static str,
    route: String,
    category: &'static str,
    description: &'static str,
}

impl From<Tool> for ToolEntry {
    fn from(tool: Tool) -> Self {
        Self {
            tool,
            name: tool.name(),
            route: tool.route(),
            category: tool.category().label(),
            description: tool.description(),
        }
    }
}

fn tools(json: bool, route: Option<Tool>) -> Result<()> {
    let entries: Vec<ToolEntry> = match route {
        Some(tool) => vec![tool.into()],
        None => Tool::all().iter().copied().map(ToolEntry::from).collect(),
    };
    emit(json, &entries, |entries| {
        entries
            .iter()
            .map(|e| format!("{:<22} {:<22} {}", e.route, e.name, e.description))
            .collect::<Vec<_>>()
            .join("\n")
    })
}
