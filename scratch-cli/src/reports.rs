use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use scratch_game::{GameResult, SimulationSummary};

pub fn write_result<W: Write + ?Sized>(
    out: &mut W,
    result: &GameResult,
    pretty: bool,
) -> Result<()> {
    let json = if pretty {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    out: &mut W,
    summary: &SimulationSummary,
    pretty: bool,
) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)?
    } else {
        serde_json::to_string(summary)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    summary: &SimulationSummary,
) -> Result<()> {
    writeln!(out, "{}", "🎰 Scratch Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=============================".cyan())?;
    writeln!(out, "Seed: {}", summary.seed)?;
    writeln!(out, "Rounds: {}", summary.rounds)?;
    writeln!(out, "Bet per round: {:.2}", summary.bet)?;
    writeln!(out, "Total bet: {:.2}", summary.total_bet)?;
    writeln!(out, "Total reward: {:.2}", summary.total_reward)?;

    let rtp = format!("{:.2}%", summary.rtp * 100.0);
    let rtp = if summary.rtp >= 1.0 { rtp.green() } else { rtp.yellow() };
    writeln!(out, "RTP: {rtp}")?;
    writeln!(
        out,
        "Hit rate: {:.2}% ({} winning rounds)",
        summary.hit_rate * 100.0,
        summary.winning_rounds
    )?;
    writeln!(out, "Rounds with bonus: {}", summary.bonus_rounds)?;
    writeln!(out, "Max reward: {:.2}", summary.max_reward)?;

    if !summary.pattern_hits.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Win combinations".bright_yellow().bold())?;
        for (name, hits) in &summary.pattern_hits {
            writeln!(out, "  {name:40} {hits}")?;
        }
    }
    Ok(())
}
