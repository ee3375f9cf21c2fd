//! Dashboard demo: a title bar and three labeled panels around stand-in chart
//! output, re-rendered for a few ticks through the frame cache.
//!
//! `BOXFRAME_ACCENT` overrides the border colour (`#RRGGBB` or a colour name),
//! `BOXFRAME_LOG` names a JSON-lines file that receives frame diagnostics.

use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::cursor;
use crossterm::terminal::{self, Clear, ClearType};

use boxframe::{
    Accent, BorderStyle, FileSink, Frame, FrameCache, FrameRenderer, FrameSpec, LabelMode,
    LogLevel, Logger, RenderedFrame, RendererSettings, Result,
};

const HEADER_PANEL: &str = "app:dashboard.header";
const HEATMAP_PANEL: &str = "app:dashboard.heatmap";
const LINE_PANEL: &str = "app:dashboard.line";
const BAR_PANEL: &str = "app:dashboard.bars";
const DEFAULT_ACCENT: &str = "#2196F3";
const MAX_WIDTH: usize = 70;
const TICKS: u32 = 4;

fn main() -> Result<()> {
    let accent = env::var("BOXFRAME_ACCENT").unwrap_or_else(|_| DEFAULT_ACCENT.to_string());
    let accent = Accent::parse(&accent)?;
    let logger = match env::var("BOXFRAME_LOG") {
        Ok(path) => Some(Logger::new(FileSink::append(path)?).with_min_level(LogLevel::Debug)),
        Err(_) => None,
    };

    let (columns, _) = terminal::size().unwrap_or((80, 24));
    let width = (columns as usize).min(MAX_WIDTH);

    let base = FrameSpec::new(width).with_color(accent);
    let header = panel(
        base.clone()
            .with_style(BorderStyle::Title)
            .with_label("DataViz Terminal Dashboard"),
        logger.as_ref(),
    );
    let heatmap = panel(base.clone().with_label("CONTRIBUTION HEATMAP"), logger.as_ref());
    let line = panel(base.clone().with_label("METRICS LINE GRAPH"), logger.as_ref());
    let bars = panel(
        base.with_label("LANGUAGE USAGE")
            .with_label_mode(LabelMode::CenteredTitle),
        logger.as_ref(),
    );

    let mut stdout = io::stdout();
    let mut cache = FrameCache::new();
    let mut renderer = FrameRenderer::new(RendererSettings {
        origin: Some((0, 0)),
        gap: 1,
    });

    stdout.execute(Clear(ClearType::All))?.execute(cursor::Hide)?;
    let panels = [&header, &heatmap, &line, &bars];
    let ticked = run_ticks(&mut stdout, &mut cache, &mut renderer, panels);
    stdout.execute(cursor::Show)?;
    ticked?;

    writeln!(
        stdout,
        "\ncache hits: {} misses: {}",
        cache.hits(),
        cache.misses()
    )?;
    Ok(())
}

/// Tick loop; any error surfaces only after the caller has restored the cursor.
fn run_ticks(
    stdout: &mut io::Stdout,
    cache: &mut FrameCache,
    renderer: &mut FrameRenderer,
    panels: [&Frame; 4],
) -> Result<()> {
    let [header, heatmap, line, bars] = panels;
    let (columns, rows) = terminal::size().unwrap_or((80, 24));
    for tick in 0..TICKS {
        let info = format!(" Size: {columns}x{rows} • Tick: {tick}/{TICKS} ");
        let frames: Vec<RenderedFrame> = vec![
            cache.render_title(HEADER_PANEL, header, &info).clone(),
            cache
                .render(HEATMAP_PANEL, heatmap, &heatmap_rows(heatmap.content_width()))
                .clone(),
            cache
                .render(LINE_PANEL, line, &sparkline(line.content_width(), tick))
                .clone(),
            cache
                .render(BAR_PANEL, bars, &bar_rows(bars.content_width()))
                .clone(),
        ];
        renderer.render(stdout, &frames)?;
        thread::sleep(Duration::from_millis(400));
    }
    Ok(())
}

fn panel(spec: FrameSpec, logger: Option<&Logger>) -> Frame {
    let frame = Frame::new(spec);
    match logger {
        Some(logger) => frame.with_logger(logger.clone()),
        None => frame,
    }
}

/// Three rows of truecolour cells standing in for a contribution heatmap.
fn heatmap_rows(width: usize) -> String {
    (0..3)
        .map(|row| {
            (0..width + 6)
                .map(|col| {
                    let level = ((row * 7 + col * 3) % 5) as u8;
                    let green = 60 + level * 45;
                    format!("\x1b[38;2;30;{green};60m■\x1b[0m")
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Block sparkline that scrolls with the tick; deliberately wider than the panel.
fn sparkline(width: usize, tick: u32) -> String {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let series: String = (0..width + 10)
        .map(|i| BLOCKS[(i + tick as usize) % BLOCKS.len()])
        .collect();
    format!("\x1b[36m{series}\x1b[0m\n\x1b[2mrequests/s, last {width} samples")
}

/// Horizontal bars with a label column; the last label is wide on purpose.
fn bar_rows(width: usize) -> String {
    let entries: [(&str, usize); 4] = [
        ("Rust", 62),
        ("Go", 21),
        ("TypeScript", 11),
        ("日本語ドキュメント", 6),
    ];
    let bar_space = width.saturating_sub(16);
    entries
        .iter()
        .map(|&(name, percent)| {
            let filled = bar_space * percent / 100;
            format!(
                "{name:<10} \x1b[35m{}\x1b[0m {percent}%",
                "█".repeat(filled)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
