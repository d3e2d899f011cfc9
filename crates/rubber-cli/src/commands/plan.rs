use anyhow::Result;
use serde::Serialize;

use rubber_core::indicator::{plan, Direction, MotionStep};
use rubber_core::Error;

#[derive(Debug, Serialize)]
struct PlanReport {
    pages: usize,
    from: usize,
    to: usize,
    direction: Option<Direction>,
    steps: Vec<MotionStep>,
}

pub fn run(pages: usize, from: i64, to: i64, json: bool) -> Result<()> {
    let report = build_report(pages, from, to)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.direction {
        None => println!(
            "{} pages: {} -> {} is a no-op",
            report.pages, report.from, report.to
        ),
        Some(direction) => {
            println!(
                "{} pages: {} -> {} ({} hops, markers move {:?})\n",
                report.pages,
                report.from,
                report.to,
                report.steps.len(),
                direction
            );
            for step in &report.steps {
                println!("  #{} marker {} hops {:?}", step.ordinal, step.marker, step.direction);
            }
        }
    }

    Ok(())
}

fn build_report(pages: usize, from: i64, to: i64) -> Result<PlanReport> {
    if pages == 0 {
        return Err(Error::InvalidPageCount(pages).into());
    }

    let last = (pages - 1) as i64;
    let from = from.clamp(0, last) as usize;
    let to = to.clamp(0, last) as usize;

    Ok(PlanReport {
        pages,
        from,
        to,
        direction: Direction::between(from, to),
        steps: plan(from, to, pages - 1),
    })
}
