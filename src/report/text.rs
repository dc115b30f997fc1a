//! Plain-text reports.
//!
//! ## Game log
//!
//! `write_game_log` produces `game_log.txt`:
//!
//! ```text
//! WHITE ELEPHANT GIFT EXCHANGE - COMPLETE GAME LOG
//! ============================================================
//!
//!
//! === Player 1's Turn ===
//!   Player 1 unwraps Gift #3: Board Game Collection
//! ...
//! ```
//!
//! followed by FINAL RESULTS and GIFT STATUS sections. `parse_game_log`
//! reads the turn section back into the action-state rows the matrix chart
//! draws, so a chart can be rebuilt from the text file alone.
//!
//! ## Console
//!
//! `write_console_summary` prints the end-of-game sections shown after
//! `simulate`: validation, game statistics, final results and per-gift
//! statistics.

use std::io::Write;
use std::str::FromStr;

use crate::core::{ActionEvent, PlayerId, StateSnapshot};
use crate::error::ReportError;
use crate::game::{ActionState, ActionStateKind, GameRecord, GameSummary, TurnRecord};
use crate::gifts::{GiftId, GiftRegistry};
use crate::rules::ChainEnd;

const TITLE: &str = "WHITE ELEPHANT GIFT EXCHANGE - COMPLETE GAME LOG";
const FILE_RULE_WIDTH: usize = 60;
const CONSOLE_RULE_WIDTH: usize = 50;

fn status_word(locked: bool) -> &'static str {
    if locked {
        "LOCKED"
    } else {
        "Available"
    }
}

fn section<W: Write>(out: &mut W, title: &str, width: usize) -> Result<(), ReportError> {
    let rule = "=".repeat(width);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")?;
    Ok(())
}

/// One turn: heading, one line per event, lock and stall notes.
pub fn write_turn<W: Write>(out: &mut W, turn: &TurnRecord) -> Result<(), ReportError> {
    writeln!(out, "\n=== {}'s Turn ===", turn.player)?;
    for action in &turn.actions {
        writeln!(out, "  {}", action.event)?;
        if let ActionEvent::Steal {
            gift,
            steals,
            locked: true,
            ..
        } = &action.event
        {
            writeln!(out, "    Gift {gift} is now LOCKED ({steals} steals)")?;
        }
    }
    match turn.end {
        ChainEnd::Unwrapped => {}
        ChainEnd::Stalled(player) => {
            writeln!(out, "  {player} has no valid moves, keeps current gift")?;
        }
        ChainEnd::AlreadyHolding(gift) => {
            writeln!(out, "  {} already holds Gift {gift}, turn passes", turn.player)?;
        }
    }
    Ok(())
}

/// Every turn of a game, in order.
pub fn write_turn_log<W: Write>(out: &mut W, record: &GameRecord) -> Result<(), ReportError> {
    for turn in record.log.turns() {
        write_turn(out, turn)?;
    }
    Ok(())
}

/// Seats and what they ended with. Giftless seats are left out.
pub fn write_final_results<W: Write>(
    out: &mut W,
    summary: &GameSummary,
    width: usize,
) -> Result<(), ReportError> {
    section(out, "FINAL RESULTS", width)?;
    for holding in &summary.holdings {
        if let Some(gift) = &holding.gift {
            writeln!(
                out,
                "{}: {} (value: {}, stolen: {}x, {})",
                holding.player,
                gift.name,
                gift.desirability,
                gift.steals,
                status_word(gift.locked)
            )?;
        }
    }
    Ok(())
}

/// The complete `game_log.txt`.
pub fn write_game_log<W: Write>(out: &mut W, record: &GameRecord) -> Result<(), ReportError> {
    let rule = "=".repeat(FILE_RULE_WIDTH);
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    write_turn_log(out, record)?;

    write_final_results(out, &record.summary, FILE_RULE_WIDTH)?;

    section(out, "GIFT STATUS", FILE_RULE_WIDTH)?;
    for gift in &record.summary.gifts {
        let owner = gift.owner.map_or_else(|| "None".to_string(), |p| p.to_string());
        writeln!(
            out,
            "Gift {}: {} (value: {}) - {}, {}, Owner: {}, Stolen: {} times",
            gift.id,
            gift.name,
            gift.desirability,
            if gift.opened { "Opened" } else { "Never opened" },
            status_word(gift.locked),
            owner,
            gift.steals
        )?;
    }
    Ok(())
}

/// GAME VALIDATION section.
pub fn write_validation<W: Write>(out: &mut W, summary: &GameSummary) -> Result<(), ReportError> {
    section(out, "GAME VALIDATION", CONSOLE_RULE_WIDTH)?;
    let validation = &summary.validation;

    if validation.giftless_players.is_empty() {
        writeln!(out, "✓ All players have gifts")?;
    } else {
        let names: Vec<String> = validation
            .giftless_players
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(
            out,
            "ERROR: {} players have no gifts: [{}]",
            names.len(),
            names.join(", ")
        )?;
    }

    if validation.unopened_gifts.is_empty() {
        writeln!(out, "✓ All gifts were opened")?;
    } else {
        let names: Vec<&str> = validation
            .unopened_gifts
            .iter()
            .filter_map(|id| summary.gift(*id))
            .map(|g| g.name.as_str())
            .collect();
        writeln!(
            out,
            "ERROR: {} gifts were never opened: [{}]",
            validation.unopened_gifts.len(),
            names.join(", ")
        )?;
    }
    Ok(())
}

/// `G5 (3x)`, or `None` when nothing was stolen.
fn most_stolen_label(summary: &GameSummary) -> String {
    summary
        .stats
        .most_stolen
        .and_then(|id| summary.gift(id))
        .map_or_else(
            || "None".to_string(),
            |g| format!("{} ({}x)", g.id.short_label(), g.steals),
        )
}

/// GAME STATISTICS section.
pub fn write_game_statistics<W: Write>(
    out: &mut W,
    summary: &GameSummary,
) -> Result<(), ReportError> {
    section(out, "GAME STATISTICS", CONSOLE_RULE_WIDTH)?;
    let stats = &summary.stats;
    writeln!(out, "Total actions: {}", stats.actions)?;
    writeln!(out, "Total steals: {}", stats.steals)?;
    writeln!(out, "Locked gifts: {}", stats.locked_gifts)?;
    writeln!(out, "Most stolen: {}", most_stolen_label(summary))?;
    Ok(())
}

/// GIFT STATISTICS section, most stolen first.
pub fn write_gift_statistics<W: Write>(
    out: &mut W,
    summary: &GameSummary,
) -> Result<(), ReportError> {
    section(out, "GIFT STATISTICS", CONSOLE_RULE_WIDTH)?;
    for gift in summary.gifts_by_steals() {
        let owner = gift.owner.map_or_else(|| "Unopened".to_string(), |p| p.to_string());
        writeln!(
            out,
            "Gift {}: {} (value: {}) - Stolen: {}x, {}, Owner: {}",
            gift.id,
            gift.name,
            gift.desirability,
            gift.steals,
            status_word(gift.locked),
            owner
        )?;
    }
    Ok(())
}

/// Everything `simulate` prints after the turns.
pub fn write_console_summary<W: Write>(
    out: &mut W,
    summary: &GameSummary,
) -> Result<(), ReportError> {
    write_validation(out, summary)?;
    write_game_statistics(out, summary)?;
    write_final_results(out, summary, CONSOLE_RULE_WIDTH)?;
    write_gift_statistics(out, summary)
}

/// Rebuild the action-state rows from the turn section of a text log.
///
/// Gift names and identities come from `registry`; steal counters are
/// recounted while reading, locking at `lock_threshold`. Parsing stops at
/// the FINAL RESULTS section.
pub fn parse_game_log(
    text: &str,
    registry: &GiftRegistry,
    players: usize,
    lock_threshold: u32,
) -> Result<Vec<ActionState>, ReportError> {
    let mut current = StateSnapshot::initial(registry, players);
    let mut states = vec![ActionState {
        kind: ActionStateKind::Initial,
        snapshot: current.clone(),
    }];

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let number = index + 1;
        let fail = |message: String| ReportError::Parse {
            line: number,
            message,
        };

        if line == "FINAL RESULTS" {
            break;
        }

        if let Some(rest) = line.strip_prefix("=== ") {
            let Some(name) = rest.strip_suffix("'s Turn ===") else {
                continue;
            };
            let player = parse_player(name, players).map_err(fail)?;
            states.push(ActionState {
                kind: ActionStateKind::TurnStart(player),
                snapshot: current.clone(),
            });
            continue;
        }

        let event = if let Some((actor, rest)) = line.split_once(" unwraps Gift #") {
            let actor = parse_player(actor, players).map_err(fail)?;
            let gift = parse_gift(rest, registry).map_err(fail)?;
            ActionEvent::Unwrap {
                actor,
                gift,
                gift_name: registry.name(gift).to_string(),
            }
        } else if let Some((actor, rest)) = line.split_once(" steals Gift #") {
            let actor = parse_player(actor, players).map_err(fail)?;
            let (rest, victim) = rest
                .rsplit_once(" from ")
                .ok_or_else(|| fail(format!("steal without a victim: {line}")))?;
            let gift = parse_gift(rest, registry).map_err(fail)?;
            let victim = parse_player(victim, players).map_err(fail)?;
            let before = current.gift(gift).map_or(0, |g| g.steals);
            let steals = before + 1;
            let was_locked = current.gift(gift).is_some_and(|g| g.locked);
            ActionEvent::Steal {
                actor,
                gift,
                gift_name: registry.name(gift).to_string(),
                victim,
                steals,
                locked: !was_locked && steals >= lock_threshold,
            }
        } else {
            continue;
        };

        current.apply(&event);
        states.push(ActionState {
            kind: ActionStateKind::Action(event),
            snapshot: current.clone(),
        });
    }

    Ok(states)
}

fn parse_player(text: &str, players: usize) -> Result<PlayerId, String> {
    let player = PlayerId::from_str(text.trim()).map_err(|e| e.to_string())?;
    if player.index() >= players {
        return Err(format!("{player} is not one of {players} players"));
    }
    Ok(player)
}

/// `rest` is `N: Name`, starting right after `Gift #`. The name, when
/// present, must be the one registered for `N`.
fn parse_gift(rest: &str, registry: &GiftRegistry) -> Result<GiftId, String> {
    let (digits, name) = rest.split_once(':').unwrap_or((rest, ""));
    let digits = digits.trim();
    let id = digits
        .parse::<u32>()
        .map(GiftId)
        .map_err(|_| format!("bad gift number {digits:?}"))?;
    if !registry.contains(id) {
        return Err(format!("gift {id} is not in the registry"));
    }

    let name = name.trim();
    if name.is_empty() || registry.name(id) == name {
        return Ok(id);
    }
    Err(match registry.find_by_name(name) {
        Some(other) => format!(
            "gift {id} is {:?}, but {name:?} is gift {}",
            registry.name(id),
            other.id
        ),
        None => format!("gift {id} is {:?}, not {name:?}", registry.name(id)),
    })
}
