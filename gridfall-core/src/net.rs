use serde::{Deserialize, Serialize};

use crate::state::Board;

/// A discrete command interpreted by the server. `Tick` is synthesized by the
/// client's gravity timer, everything else comes from the keyboard.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Left,
    Right,
    Down,
    Rotate,
    Tick,
}

/// Body of `POST /api/action`. The server sends no response body worth
/// consuming.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: Action,
}

/// Body of `GET /api/state`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateResponse {
    pub board: Board,
    pub score: u32,
}

#[cfg(test)]
mod test {
    use serde_test::{Token, assert_tokens};

    use super::{Action, ActionRequest, StateResponse};
    use crate::state::{BOARD_HEIGHT, BOARD_WIDTH};

    #[test]
    fn action_wire_names() {
        for (action, name) in [
            (Action::Left, "left"),
            (Action::Right, "right"),
            (Action::Down, "down"),
            (Action::Rotate, "rotate"),
            (Action::Tick, "tick"),
        ] {
            assert_tokens(
                &action,
                &[Token::UnitVariant {
                    name: "Action",
                    variant: name,
                }],
            );
        }
    }

    #[test]
    fn action_request_body() {
        let body = serde_json::to_string(&ActionRequest {
            action: Action::Rotate,
        })
        .unwrap();
        assert_eq!(body, r#"{"action":"rotate"}"#);
    }

    #[test]
    fn state_response_from_server_json() {
        // three occupied cells in the bottom-left corner
        let rows: Vec<Vec<bool>> = (0..BOARD_HEIGHT)
            .map(|y| {
                (0..BOARD_WIDTH)
                    .map(|x| y == BOARD_HEIGHT - 1 && x < 3)
                    .collect()
            })
            .collect();
        let json = serde_json::json!({ "board": rows, "score": 1200 }).to_string();

        let state: StateResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(state.score, 1200);
        assert!(state.board.cell(0, BOARD_HEIGHT - 1));
        assert!(state.board.cell(2, BOARD_HEIGHT - 1));
        assert!(!state.board.cell(3, BOARD_HEIGHT - 1));
        assert!(!state.board.cell(0, 0));
    }

    #[test]
    fn short_row_is_rejected() {
        let mut rows: Vec<Vec<bool>> = (0..BOARD_HEIGHT).map(|_| vec![false; BOARD_WIDTH]).collect();
        rows[4].pop();
        let json = serde_json::json!({ "board": rows, "score": 0 }).to_string();
        assert!(serde_json::from_str::<StateResponse>(&json).is_err());
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(serde_json::from_str::<Action>(r#""harddrop""#).is_err());
    }
}
