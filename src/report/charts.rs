//! SVG charts.
//!
//! - `summary_chart`: gift values with steal counts, and the final
//!   distribution by player
//! - `turn_summary_chart`: who held what at the start of every turn
//! - `round_by_round_chart`: every seat's gift and its value after each
//!   round, latest round on top, locked gifts in red
//! - `matrix_chart`: one row per action state (latest on top), one column
//!   per gift, cells coloured by status
//!
//! Charts are built as plain SVG text with no rendering dependency.

use crate::core::{GiftSnapshot, StateSnapshot};
use crate::game::{ActionState, GameLog, GameSummary};
use crate::gifts::GiftRegistry;

pub const SUMMARY_FILE: &str = "white_elephant_summary.svg";
pub const TURN_SUMMARY_FILE: &str = "white_elephant_turn_summary.svg";
pub const MATRIX_FILE: &str = "white_elephant_matrix.svg";
pub const ROUND_BY_ROUND_FILE: &str = "white_elephant_round_by_round.svg";

const WRAPPED: &str = "#d3d3d3";
const OPENED: &str = "#95e1d3";
const STOLEN_ONCE: &str = "#a8dadc";
const STOLEN_TWICE: &str = "#ffd93d";
const LOCKED: &str = "#ff6b6b";
const TURN_START: &str = "#2E86AB";
const BAR: &str = "#4c72b0";
/// Fills for unlocked gifts in the round-by-round chart, by identity.
const GIFT_PALETTE: [&str; 8] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#34495e", "#e67e22",
];

const BOLD: &str = "font-weight=\"bold\"";

/// Cell colour for one gift in one state.
#[must_use]
pub fn cell_color(gift: &GiftSnapshot) -> &'static str {
    match gift {
        GiftSnapshot { owner: None, .. } => WRAPPED,
        GiftSnapshot { locked: true, .. } => LOCKED,
        GiftSnapshot { steals: 0, .. } => OPENED,
        GiftSnapshot { steals: 1, .. } => STOLEN_ONCE,
        _ => STOLEN_TWICE,
    }
}

fn heading_style() -> String {
    format!("font-weight=\"bold\" fill=\"{TURN_START}\"")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Minimal SVG document builder.
struct Svg {
    width: f64,
    height: f64,
    body: String,
}

impl Svg {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.body.push_str(&format!(
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{w:.1}\" height=\"{h:.1}\" \
             fill=\"{fill}\" stroke=\"black\" stroke-width=\"1\"/>\n"
        ));
    }

    fn text(&mut self, x: f64, y: f64, size: u32, anchor: &str, style: &str, content: &str) {
        self.body.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{y:.1}\" font-size=\"{size}\" text-anchor=\"{anchor}\" \
             dominant-baseline=\"middle\" {style}>{}</text>\n",
            escape(content)
        ));
    }

    fn title(&mut self, content: &str) {
        let x = self.width / 2.0;
        self.text(x, 30.0, 24, "middle", BOLD, content);
    }

    fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" \
             viewBox=\"0 0 {w:.0} {h:.0}\" font-family=\"sans-serif\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Gift values (bar height) with steal counts, and each player's final gift.
#[must_use]
pub fn summary_chart(summary: &GameSummary) -> String {
    const BAR_WIDTH: f64 = 60.0;
    const GAP: f64 = 20.0;
    const PLOT_HEIGHT: f64 = 240.0;
    const LEFT: f64 = 60.0;

    let columns = summary.gifts.len().max(summary.holdings.len()).max(1) as f64;
    let width = LEFT * 2.0 + columns * (BAR_WIDTH + GAP);
    let height = 2.0 * PLOT_HEIGHT + 220.0;
    let mut svg = Svg::new(width, height);
    svg.title("White Elephant Results");

    let max_value = summary
        .gifts
        .iter()
        .map(|g| g.desirability)
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    // Top panel: every gift.
    let base = 60.0 + PLOT_HEIGHT;
    svg.text(LEFT, 60.0, 16, "start", BOLD, "Gift Values and Steal Counts");
    for (i, gift) in summary.gifts.iter().enumerate() {
        let x = LEFT + i as f64 * (BAR_WIDTH + GAP);
        let h = f64::from(gift.desirability) / max_value * (PLOT_HEIGHT - 40.0);
        let fill = if gift.locked { LOCKED } else { BAR };
        svg.rect(x, base - h, BAR_WIDTH, h, fill);
        let mid = x + BAR_WIDTH / 2.0;
        let steals = format!("{} steals", gift.steals);
        svg.text(mid, base - h - 10.0, 12, "middle", "", &steals);
        svg.text(mid, base + 14.0, 12, "middle", BOLD, &gift.id.short_label());
        svg.text(mid, base + 30.0, 11, "middle", "", &gift.desirability.to_string());
    }

    // Bottom panel: every seat's final gift value.
    let top = base + 70.0;
    let base = top + PLOT_HEIGHT;
    svg.text(LEFT, top, 16, "start", BOLD, "Final Distribution by Player");
    for (i, holding) in summary.holdings.iter().enumerate() {
        let x = LEFT + i as f64 * (BAR_WIDTH + GAP);
        let mid = x + BAR_WIDTH / 2.0;
        if let Some(gift) = &holding.gift {
            let h = f64::from(gift.desirability) / max_value * (PLOT_HEIGHT - 40.0);
            let fill = if gift.locked { LOCKED } else { OPENED };
            svg.rect(x, base - h, BAR_WIDTH, h, fill);
            svg.text(mid, base - h - 10.0, 12, "middle", "", &gift.id.short_label());
        } else {
            svg.text(mid, base - 10.0, 12, "middle", "", "No gift");
        }
        let seat = holding.player.short_label();
        svg.text(mid, base + 14.0, 12, "middle", BOLD, &seat);
    }

    svg.finish()
}

/// Holdings at the start of each turn, plus the final table.
///
/// Columns are turns, rows are seats; each cell names the held gift.
#[must_use]
pub fn turn_summary_chart(log: &GameLog) -> String {
    const CELL_W: f64 = 90.0;
    const CELL_H: f64 = 36.0;
    const LEFT: f64 = 80.0;
    const TOP: f64 = 110.0;

    let mut columns: Vec<(String, &StateSnapshot)> = log
        .turns()
        .map(|t| (format!("{} Starts", t.player.short_label()), &t.start))
        .collect();
    columns.push(("Final".to_string(), log.final_state()));
    let seats = log.initial().holdings.len();

    let width = LEFT + columns.len() as f64 * CELL_W + 40.0;
    let height = TOP + seats as f64 * CELL_H + 40.0;
    let mut svg = Svg::new(width, height);
    svg.title("White Elephant Turn Summary");

    for seat in 0..seats {
        let y = TOP + seat as f64 * CELL_H;
        let label = format!("P{}", seat + 1);
        svg.text(LEFT - 10.0, y + CELL_H / 2.0, 14, "end", BOLD, &label);
    }

    for (col, (label, snapshot)) in columns.iter().enumerate() {
        let x = LEFT + col as f64 * CELL_W;
        let mid = x + CELL_W / 2.0;
        svg.text(mid, TOP - 20.0, 13, "middle", &heading_style(), label);
        for (seat, held) in snapshot.holdings.iter().enumerate() {
            let y = TOP + seat as f64 * CELL_H;
            match held.and_then(|id| snapshot.gift(id)) {
                Some(gift) => {
                    svg.rect(x, y, CELL_W, CELL_H, cell_color(gift));
                    let label = gift.id.short_label();
                    svg.text(mid, y + CELL_H / 2.0, 13, "middle", BOLD, &label);
                }
                None => {
                    svg.rect(x, y, CELL_W, CELL_H, "white");
                    svg.text(mid, y + CELL_H / 2.0, 13, "middle", "", "—");
                }
            }
        }
    }

    svg.finish()
}

/// Fill for a held gift in the round-by-round chart.
fn round_color(gift: &GiftSnapshot) -> &'static str {
    if gift.locked {
        LOCKED
    } else {
        GIFT_PALETTE[gift.id.raw() as usize % GIFT_PALETTE.len()]
    }
}

/// Holdings after every round: one row per turn (latest on top), one
/// column per seat. Each cell shows the gift and its value.
#[must_use]
pub fn round_by_round_chart(log: &GameLog, registry: &GiftRegistry) -> String {
    const CELL_W: f64 = 90.0;
    const CELL_H: f64 = 44.0;
    const LEFT: f64 = 200.0;
    const TOP: f64 = 100.0;

    let rounds: Vec<_> = log.turns().collect();
    let seats = log.initial().holdings.len();
    let width = LEFT + seats as f64 * CELL_W + 40.0;
    let height = TOP + rounds.len() as f64 * CELL_H + 40.0;
    let mut svg = Svg::new(width, height);
    svg.title("Gift Movement Through Rounds");

    for seat in 0..seats {
        let x = LEFT + seat as f64 * CELL_W + CELL_W / 2.0;
        svg.text(x, TOP - 20.0, 14, "middle", BOLD, &format!("P{}", seat + 1));
    }

    for (row, turn) in rounds.iter().rev().enumerate() {
        let y = TOP + row as f64 * CELL_H;
        let label = format!("Round {}: {}", turn.turn, turn.player);
        svg.text(LEFT - 10.0, y + CELL_H / 2.0, 13, "end", &heading_style(), &label);

        let snapshot = turn.end_state();
        for (seat, held) in snapshot.holdings.iter().enumerate() {
            let x = LEFT + seat as f64 * CELL_W;
            let mid = x + CELL_W / 2.0;
            let Some(gift) = held.and_then(|id| snapshot.gift(id)) else {
                svg.rect(x, y, CELL_W, CELL_H, "white");
                svg.text(mid, y + CELL_H / 2.0, 12, "middle", "", "No gift");
                continue;
            };
            svg.rect(x, y, CELL_W, CELL_H, round_color(gift));
            svg.text(mid, y + CELL_H * 0.35, 12, "middle", BOLD, &gift.id.short_label());
            let value = registry.desirability(gift.id).to_string();
            svg.text(mid, y + CELL_H * 0.7, 11, "middle", "", &value);
        }
    }

    svg.finish()
}

/// The game matrix: one row per action state, latest at the top.
#[must_use]
pub fn matrix_chart(states: &[ActionState], registry: &GiftRegistry) -> String {
    const CELL_W: f64 = 80.0;
    const CELL_H: f64 = 48.0;
    const LABEL_W: f64 = 520.0;
    const TOP: f64 = 100.0;

    let gifts: Vec<_> = registry.ids().collect();
    let width = LABEL_W + gifts.len() as f64 * CELL_W + 40.0;
    let height = TOP + states.len() as f64 * CELL_H + 110.0;
    let mut svg = Svg::new(width, height);
    svg.title("White Elephant Game Matrix - Round by Round View");

    for (col, id) in gifts.iter().enumerate() {
        let x = LABEL_W + col as f64 * CELL_W + CELL_W / 2.0;
        svg.text(x, TOP - 20.0, 18, "middle", BOLD, &id.short_label());
    }

    for (row, state) in states.iter().rev().enumerate() {
        let y = TOP + row as f64 * CELL_H;
        let style = if state.is_turn_start() {
            heading_style()
        } else {
            "font-style=\"italic\"".to_string()
        };
        let size = if state.is_turn_start() { 16 } else { 13 };
        svg.text(LABEL_W - 10.0, y + CELL_H / 2.0, size, "end", &style, &state.label());

        for (col, id) in gifts.iter().enumerate() {
            let x = LABEL_W + col as f64 * CELL_W;
            let Some(gift) = state.snapshot.gift(*id) else {
                continue;
            };
            let mid = x + CELL_W / 2.0;
            svg.rect(x, y, CELL_W, CELL_H, cell_color(gift));
            svg.text(mid, y + CELL_H * 0.25, 12, "middle", BOLD, &id.short_label());
            let owner = gift.owner.map_or_else(|| "—".to_string(), |p| p.short_label());
            svg.text(mid, y + CELL_H * 0.6, 12, "middle", "", &owner);
            if gift.steals > 0 {
                let steals = format!("×{}", gift.steals);
                svg.text(x + CELL_W * 0.9, y + CELL_H * 0.85, 10, "end", BOLD, &steals);
            }
        }
    }

    let legend = [
        (WRAPPED, "Wrapped"),
        (OPENED, "Opened (0 steals)"),
        (STOLEN_ONCE, "Stolen once"),
        (STOLEN_TWICE, "Stolen twice or more"),
        (LOCKED, "Locked"),
    ];
    let y = TOP + states.len() as f64 * CELL_H + 40.0;
    for (i, (color, label)) in legend.iter().enumerate() {
        let x = 20.0 + i as f64 * 200.0;
        svg.rect(x, y, 24.0, 18.0, color);
        svg.text(x + 32.0, y + 9.0, 14, "start", "", label);
    }

    svg.finish()
}
