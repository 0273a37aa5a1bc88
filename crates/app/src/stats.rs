use std::io::{self, Write};

use quiz_core::model::Difficulty;
use services::HistoryStats;
use services::time_fmt::format_elapsed;

/// Print the dashboard figures as plain text.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render(stats: &HistoryStats, output: &mut impl Write) -> io::Result<()> {
    if stats.total_games == 0 {
        writeln!(output, "No games played yet.")?;
        return Ok(());
    }

    writeln!(output, "Games played:   {}", stats.total_games)?;
    writeln!(output, "Average score:  {:.0}%", stats.average_score_percent)?;
    writeln!(
        output,
        "Average time:   {}",
        format_elapsed(stats.average_time_ms.round() as u64)
    )?;

    writeln!(output)?;
    writeln!(output, "By difficulty:")?;
    for difficulty in Difficulty::ALL {
        writeln!(
            output,
            "  {difficulty:<8}{}",
            stats.by_difficulty.get(difficulty)
        )?;
    }

    writeln!(output)?;
    writeln!(output, "Best scores:")?;
    for (rank, entry) in stats.best_scores.iter().enumerate() {
        writeln!(
            output,
            "  {}. {} {}/{} ({}) {}",
            rank + 1,
            entry.username(),
            entry.correct_answers(),
            entry.total_questions(),
            entry.difficulty(),
            entry.date().format("%Y-%m-%d"),
        )?;
    }

    writeln!(output)?;
    writeln!(output, "Recent trend:")?;
    for point in &stats.trend {
        writeln!(
            output,
            "  {} {:>3}%",
            point.date.format("%Y-%m-%d %H:%M"),
            point.score_percent
        )?;
    }
    Ok(())
}
