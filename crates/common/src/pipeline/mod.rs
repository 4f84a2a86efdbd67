//! Pipeline (Kanban) board model.
//!
//! Opportunities move through a fixed, closed set of six statuses. There is
//! deliberately no transition graph: any status may be set from any other,
//! matching the original board where every column accepts a drop from every
//! other column. Statuses are stored as text; rows carrying a string outside
//! the fixed set surface in an explicit catch-all column instead of being
//! silently dropped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::formatters::format_currency;

/// The fixed six pipeline statuses, with their exact wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidStatus {
    #[serde(rename = "Triagem")]
    Triagem,
    #[serde(rename = "Em Análise")]
    EmAnalise,
    #[serde(rename = "Disputa")]
    Disputa,
    #[serde(rename = "Aguardando")]
    Aguardando,
    #[serde(rename = "Ganha")]
    Ganha,
    #[serde(rename = "Perdida")]
    Perdida,
}

impl BidStatus {
    /// Column order on the board.
    pub const ALL: [BidStatus; 6] = [
        BidStatus::Triagem,
        BidStatus::EmAnalise,
        BidStatus::Disputa,
        BidStatus::Aguardando,
        BidStatus::Ganha,
        BidStatus::Perdida,
    ];

    /// Default status for newly created opportunities.
    pub const DEFAULT: BidStatus = BidStatus::Triagem;

    /// Parse the stored status string. `None` means the row carries a
    /// legacy/unknown value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Triagem" => Some(BidStatus::Triagem),
            "Em Análise" => Some(BidStatus::EmAnalise),
            "Disputa" => Some(BidStatus::Disputa),
            "Aguardando" => Some(BidStatus::Aguardando),
            "Ganha" => Some(BidStatus::Ganha),
            "Perdida" => Some(BidStatus::Perdida),
            _ => None,
        }
    }

    /// The exact string stored in the status column.
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Triagem => "Triagem",
            BidStatus::EmAnalise => "Em Análise",
            BidStatus::Disputa => "Disputa",
            BidStatus::Aguardando => "Aguardando",
            BidStatus::Ganha => "Ganha",
            BidStatus::Perdida => "Perdida",
        }
    }

    /// Won and lost are terminal: cards there are never urgent or late.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BidStatus::Ganha | BidStatus::Perdida)
    }

    /// Whether a stored status string already names this status. A move onto
    /// the column a card currently occupies is a no-op.
    pub fn matches(&self, stored: &str) -> bool {
        self.as_str() == stored
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deadline window (in days) under which a non-terminal card is flagged urgent.
pub const URGENCY_WINDOW_DAYS: i64 = 2;

/// A card on the board: one opportunity joined with its client display name,
/// annotated with deadline flags computed against `today`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardCard {
    pub id: Uuid,
    pub title: String,
    pub client_id: Uuid,
    pub client_name: Option<String>,
    pub status: String,
    pub value: f64,
    pub deadline: Option<NaiveDate>,
    pub portal: Option<String>,
    /// Days until the deadline (negative when past), when a deadline is set.
    pub days_to_deadline: Option<i64>,
    /// Deadline within [0, 2] days and status non-terminal.
    pub urgent: bool,
    /// Deadline in the past and status non-terminal.
    pub late: bool,
}

impl BoardCard {
    /// Build a card, computing deadline annotations against `today`.
    pub fn annotate(
        id: Uuid,
        title: String,
        client_id: Uuid,
        client_name: Option<String>,
        status: String,
        value: f64,
        deadline: Option<NaiveDate>,
        portal: Option<String>,
        today: NaiveDate,
    ) -> Self {
        let terminal = BidStatus::parse(&status)
            .map(|s| s.is_terminal())
            .unwrap_or(false);

        let days_to_deadline = deadline.map(|d| (d - today).num_days());
        let urgent = days_to_deadline
            .map(|d| (0..=URGENCY_WINDOW_DAYS).contains(&d) && !terminal)
            .unwrap_or(false);
        let late = days_to_deadline.map(|d| d < 0 && !terminal).unwrap_or(false);

        Self {
            id,
            title,
            client_id,
            client_name,
            status,
            value,
            deadline,
            portal,
            days_to_deadline,
            urgent,
            late,
        }
    }
}

/// One column of the board with its running aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub status: String,
    pub cards: Vec<BoardCard>,
    pub count: usize,
    pub total_value: f64,
    pub total_value_display: String,
}

impl BoardColumn {
    fn new(status: String) -> Self {
        Self {
            status,
            cards: Vec::new(),
            count: 0,
            total_value: 0.0,
            total_value_display: format_currency(0.0),
        }
    }

    fn push(&mut self, card: BoardCard) {
        self.total_value += card.value;
        self.total_value_display = format_currency(self.total_value);
        self.count += 1;
        self.cards.push(card);
    }
}

/// The partitioned board: six fixed columns plus a catch-all for rows whose
/// stored status is not one of the six.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
    pub unrecognized: BoardColumn,
}

impl Board {
    /// Partition cards into the fixed columns by status equality. Card order
    /// within a column follows input order (the repository fetches by
    /// deadline ascending).
    pub fn partition(cards: Vec<BoardCard>) -> Self {
        let mut columns: Vec<BoardColumn> = BidStatus::ALL
            .iter()
            .map(|s| BoardColumn::new(s.as_str().to_string()))
            .collect();
        let mut unrecognized = BoardColumn::new("unrecognized".to_string());

        for card in cards {
            match BidStatus::parse(&card.status) {
                Some(status) => {
                    let idx = BidStatus::ALL.iter().position(|s| *s == status).unwrap();
                    columns[idx].push(card);
                }
                None => unrecognized.push(card),
            }
        }

        Self {
            columns,
            unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(status: &str, value: f64, deadline: Option<NaiveDate>, today: NaiveDate) -> BoardCard {
        BoardCard::annotate(
            Uuid::new_v4(),
            "Pregão eletrônico".into(),
            Uuid::new_v4(),
            Some("Acme Ltda".into()),
            status.into(),
            value,
            deadline,
            None,
            today,
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_status_roundtrip() {
        for status in BidStatus::ALL {
            assert_eq!(BidStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BidStatus::parse("Arquivada"), None);
    }

    #[test]
    fn test_move_onto_current_column_is_noop() {
        assert!(BidStatus::Disputa.matches("Disputa"));
        assert!(!BidStatus::Disputa.matches("Triagem"));
        // accents are part of the wire string
        assert!(BidStatus::EmAnalise.matches("Em Análise"));
        assert!(!BidStatus::EmAnalise.matches("Em Analise"));
        // unknown stored values never match, so they are always moved off
        assert!(!BidStatus::Triagem.matches("Arquivada"));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(BidStatus::Ganha.is_terminal());
        assert!(BidStatus::Perdida.is_terminal());
        assert!(!BidStatus::Triagem.is_terminal());
        assert!(!BidStatus::Disputa.is_terminal());
    }

    #[test]
    fn test_partition_into_fixed_columns() {
        let t = today();
        let cards = vec![
            card("Triagem", 100.0, None, t),
            card("Ganha", 50.0, None, t),
            card("Triagem", 30.0, None, t),
        ];

        let board = Board::partition(cards);
        assert_eq!(board.columns.len(), 6);
        assert_eq!(board.columns[0].status, "Triagem");
        assert_eq!(board.columns[0].count, 2);
        assert_eq!(board.columns[0].total_value, 130.0);
        assert_eq!(board.columns[4].count, 1);
        assert_eq!(board.unrecognized.count, 0);
    }

    #[test]
    fn test_unknown_status_lands_in_catch_all() {
        let t = today();
        let board = Board::partition(vec![card("Arquivada", 10.0, None, t)]);
        assert!(board.columns.iter().all(|c| c.count == 0));
        assert_eq!(board.unrecognized.count, 1);
        assert_eq!(board.unrecognized.total_value, 10.0);
    }

    #[test]
    fn test_column_running_total_display() {
        let t = today();
        let board = Board::partition(vec![
            card("Disputa", 1000.0, None, t),
            card("Disputa", 234.56, None, t),
        ]);
        assert_eq!(board.columns[2].total_value_display, "R$ 1.234,56");
    }

    #[test]
    fn test_urgency_window() {
        let t = today();
        for offset in 0..=2 {
            let c = card("Triagem", 0.0, Some(t + chrono::Days::new(offset)), t);
            assert!(c.urgent, "deadline +{} days should be urgent", offset);
            assert!(!c.late);
        }

        let c = card("Triagem", 0.0, Some(t + chrono::Days::new(3)), t);
        assert!(!c.urgent);
    }

    #[test]
    fn test_late_when_deadline_passed() {
        let t = today();
        let c = card("Disputa", 0.0, t.pred_opt(), t);
        assert!(c.late);
        assert!(!c.urgent);
        assert_eq!(c.days_to_deadline, Some(-1));
    }

    #[test]
    fn test_terminal_never_urgent_or_late() {
        let t = today();
        let won = card("Ganha", 0.0, Some(t), t);
        assert!(!won.urgent);

        let lost = card("Perdida", 0.0, t.pred_opt(), t);
        assert!(!lost.late);
    }

    #[test]
    fn test_no_deadline_no_flags() {
        let t = today();
        let c = card("Triagem", 0.0, None, t);
        assert!(!c.urgent);
        assert!(!c.late);
        assert_eq!(c.days_to_deadline, None);
    }
}
