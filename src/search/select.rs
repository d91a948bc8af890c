//! Candidate selection: automatic best-match and interactive pagination.
//!
//! The interactive protocol is an explicit loop over an already-ranked
//! candidate list, driven by an abstract [`Console`] so it can be tested
//! with scripted input instead of a real terminal.

use crate::types::{SearchCandidate, Selection};
use std::io::{BufRead, Write};

/// Abstract prompt/display surface for interactive selection.
///
/// Injected into the selector so the pagination protocol never touches
/// process stdin/stdout directly.
pub trait Console {
    /// Display one line to the user.
    fn show(&mut self, line: &str);

    /// Prompt for one line of input. `None` means the input source is
    /// exhausted (EOF or read failure), which terminates selection.
    fn prompt(&mut self, message: &str) -> Option<String>;
}

/// [`Console`] backed by process stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn show(&mut self, line: &str) {
        println!("{line}");
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        print!("{message}");
        std::io::stdout().flush().ok()?;
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

/// Automatic selection: the top-ranked candidate, if it clears `threshold`.
///
/// The input must already be ranked (best first). Returns
/// [`Selection::NoMatch`] for an empty list or a sub-threshold best score.
pub fn find_best_match(candidates: &[SearchCandidate], threshold: f64) -> Selection {
    match candidates.first() {
        Some(best) if best.score >= threshold => Selection::Picked(best.clone()),
        _ => Selection::NoMatch,
    }
}

/// Interactive paginated selection over a ranked candidate list.
///
/// Shows candidates `page_size` at a time, each annotated with its
/// percentage score. Input handling per prompt:
///
/// - a 1-based index into the whole ranked list selects that candidate,
/// - `m` / `more` reveals the next page, or informs the user when all
///   pages are already visible,
/// - empty input cancels,
/// - anything else re-prompts on the same page.
///
/// Terminates only on selection, cancellation, or input exhaustion.
pub fn select_interactively(
    candidates: &[SearchCandidate],
    page_size: usize,
    console: &mut dyn Console,
) -> Selection {
    let total = candidates.len();
    if total == 0 {
        return Selection::NoMatch;
    }

    let mut shown = show_page(candidates, 0, page_size, console);

    loop {
        let message = if shown < total {
            "\nEnter number to select, 'm' for more, or press Enter to cancel: "
        } else {
            "\nEnter number to select, or press Enter to cancel: "
        };

        let Some(line) = console.prompt(message) else {
            return Selection::Cancelled;
        };
        let input = line.trim().to_lowercase();

        if input.is_empty() {
            return Selection::Cancelled;
        }

        if input == "m" || input == "more" {
            if shown < total {
                shown = show_page(candidates, shown, page_size, console);
            } else {
                console.show("No more results.");
            }
            continue;
        }

        match input.parse::<usize>() {
            Ok(n) if (1..=total).contains(&n) => {
                return Selection::Picked(candidates[n - 1].clone());
            }
            Ok(_) => console.show("Invalid number. Please try again."),
            Err(_) => console.show("Invalid input. Please enter a number or 'm' for more."),
        }
    }
}

/// Display one page of candidates starting at `from`; returns the new
/// count of visible candidates.
fn show_page(
    candidates: &[SearchCandidate],
    from: usize,
    page_size: usize,
    console: &mut dyn Console,
) -> usize {
    let total = candidates.len();
    let end = (from + page_size).min(total);

    console.show(&format!("\nShowing results {}-{} of {}:", from + 1, end, total));
    for (i, candidate) in candidates.iter().enumerate().take(end).skip(from) {
        console.show(&format!(
            "  {}. {} ({:.0}% match)",
            i + 1,
            candidate.title,
            candidate.score * 100.0
        ));
    }
    end
}
