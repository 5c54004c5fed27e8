//! Layout command for placing events in a day column.
//!
//! This module implements `dl layout`: it reads JSON events, resolves the
//! configured start/end fields once per event, runs the layout and prints either a
//! table or JSON.

use std::fmt::Write as _;
use std::io::{Read, Write};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use dl_core::dates::{self, Unit};
use dl_core::{Accessors, LayoutMeta, Style, StyledEvent, Window, layout_events};
use serde::Serialize;
use serde_json::Value;

use crate::Config;
use crate::commands::util::{parse_day, parse_event_time};

/// Command-line overrides for a layout run.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    pub date: Option<String>,
    pub day_start: Option<String>,
    pub total_minutes: Option<i64>,
    pub step: Option<i64>,
    pub json: bool,
}

/// An input record, its position in the input and its resolved times.
#[derive(Debug)]
struct InputEvent {
    index: usize,
    value: Value,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl InputEvent {
    fn new(index: usize, value: Value, config: &Config) -> Self {
        let start = read_time(index, &value, &config.start_field);
        let end = read_time(index, &value, &config.end_field);
        Self {
            index,
            value,
            start,
            end,
        }
    }
}

/// One row of JSON output.
#[derive(Debug, Serialize)]
struct LayoutRow<'a> {
    index: usize,
    event: &'a Value,
    style: Style,
    meta: LayoutMeta,
}

/// Runs the layout command, reading from `input` (`-` for stdin).
pub fn run<W: Write>(
    writer: &mut W,
    input: &str,
    options: &LayoutOptions,
    config: &Config,
) -> Result<()> {
    let content = read_input(input)?;
    let today = dates::today_in(&Local);
    let output = render(&content, options, config, today)?;
    writer.write_all(output.as_bytes())?;
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read events from stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

/// Parses events as a JSON array, or as JSON Lines when the input does not
/// start with `[`.
fn parse_events(content: &str) -> Result<Vec<Value>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("failed to parse events as a JSON array");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).with_context(|| format!("invalid JSON on line {}", n + 1))
        })
        .collect()
}

/// Reads `field` from an event, warning when it is missing or unreadable.
fn read_time(index: usize, event: &Value, field: &str) -> Option<NaiveDateTime> {
    let Some(value) = event.get(field) else {
        tracing::warn!(index, field, "missing event time");
        return None;
    };
    let parsed = parse_event_time(value);
    if parsed.is_none() {
        tracing::warn!(index, field, %value, "unreadable event time");
    }
    parsed
}

/// Lays out `content` and formats the result.
fn render(
    content: &str,
    options: &LayoutOptions,
    config: &Config,
    today: NaiveDate,
) -> Result<String> {
    let day_start = match &options.day_start {
        Some(s) => dates::parse_time_of_day(s)?,
        None => config.day_start().context("invalid day_start in configuration")?,
    };
    let total_minutes = options.total_minutes.unwrap_or(config.total_minutes);
    let step = options.step.unwrap_or(config.step);

    let day = options
        .date
        .as_deref()
        .map(|s| parse_day(s, today))
        .transpose()?;
    let min = day.unwrap_or(today).and_time(day_start);
    let window = Window::new(min, total_minutes, step)?;

    let accessors = Accessors::new(|e: &InputEvent| e.start, |e: &InputEvent| e.end);

    let mut events: Vec<InputEvent> = parse_events(content)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| InputEvent::new(index, value, config))
        .collect();
    tracing::debug!(events = events.len(), "parsed input events");

    if day.is_some() {
        let before = events.len();
        let window_end = dates::add(min, total_minutes, Unit::Minute)
            .context("visible window ends out of range")?;
        events.retain(|event| {
            matches!(
                (event.start, event.end),
                (Some(start), Some(end)) if start < window_end && end > min
            )
        });
        tracing::debug!(kept = events.len(), dropped = before - events.len(), "filtered to day");
    }

    let styled = layout_events(&events, &accessors, &window, &config.packing());

    if options.json {
        let rows: Vec<_> = styled
            .iter()
            .map(|s| LayoutRow {
                index: s.event.index,
                event: &s.event.value,
                style: s.style,
                meta: s.meta,
            })
            .collect();
        let mut json = serde_json::to_string_pretty(&rows)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(format_table(&styled, &window, config))
    }
}

fn format_time(time: Option<NaiveDateTime>) -> String {
    time.map_or_else(|| "?".to_string(), |t| t.format("%H:%M").to_string())
}

fn format_run(meta: &LayoutMeta) -> String {
    match (meta.overlapping_count, meta.group_number) {
        (Some(count), Some(group)) => format!("{count}/g{group}"),
        (Some(count), None) => count.to_string(),
        _ => "-".to_string(),
    }
}

/// Formats laid-out events as a human-readable table.
fn format_table(
    styled: &[StyledEvent<'_, InputEvent>],
    window: &Window,
    config: &Config,
) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Window: {} +{}m (step {}m)",
        window.min().format("%Y-%m-%d %H:%M"),
        window.total_minutes(),
        window.step()
    );

    if styled.is_empty() {
        let _ = writeln!(out, "No events.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<4}{:<7}{:<7}{:>8}{:>8}{:>8}{:>8}  {:<6}{}",
        "#", "start", "end", "top", "height", "width", "x", "run", "title"
    );
    for s in styled {
        let title = s
            .event
            .value
            .get(&config.title_field)
            .and_then(Value::as_str)
            .unwrap_or("");
        let line = format!(
            "{:<4}{:<7}{:<7}{:>8.2}{:>8.2}{:>8.2}{:>8.2}  {:<6}{}",
            s.event.index,
            format_time(s.event.start),
            format_time(s.event.end),
            s.style.top,
            s.style.height,
            s.style.width,
            s.style.x_offset,
            format_run(&s.meta),
            title
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out
}
