//! Board rendering.
//!
//! [`build_scene`] projects the board onto a flat list of [`DrawOp`]s in
//! logical canvas pixels; [`paint`] replays them onto a 2D context. Repainting
//! the same board always yields the same pixels.

use web_sys::CanvasRenderingContext2d;

use crate::config::ClientConfig;
use crate::model::{BoardState, Cell, PlayerId};

const BACKGROUND: &str = "white";
const GRID_LINE: &str = "#ddd";
const WALL: &str = "#333";
const LABEL: &str = "white";
const LABEL_FONT: &str = "bold 20px Arial";

fn token_color(player: PlayerId) -> &'static str {
    match player {
        PlayerId::Player1 => "#ff0000",
        PlayerId::Player2 => "#0000ff",
    }
}

fn end_color(player: PlayerId) -> &'static str {
    match player {
        PlayerId::Player1 => "#ff9999",
        PlayerId::Player2 => "#9999ff",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: &'static str,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: &'static str,
    },
    Disc {
        cx: f64,
        cy: f64,
        r: f64,
        color: &'static str,
    },
    Label {
        text: String,
        cx: f64,
        cy: f64,
        color: &'static str,
    },
}

pub fn build_scene(board: &BoardState, cfg: &ClientConfig) -> Vec<DrawOp> {
    let w = cfg.canvas_width as f64;
    let h = cfg.canvas_height as f64;
    let cell = cfg.cell_size as f64;
    let mut ops = vec![DrawOp::Fill {
        x: 0.0,
        y: 0.0,
        w,
        h,
        color: BACKGROUND,
    }];

    let step = cfg.cell_size as usize;
    for x in (0..=cfg.canvas_width).step_by(step) {
        ops.push(DrawOp::Line {
            from: (x as f64, 0.0),
            to: (x as f64, h),
            color: GRID_LINE,
        });
    }
    for y in (0..=cfg.canvas_height).step_by(step) {
        ops.push(DrawOp::Line {
            from: (0.0, y as f64),
            to: (w, y as f64),
            color: GRID_LINE,
        });
    }

    for wall in &board.walls {
        ops.push(DrawOp::Fill {
            x: wall.x as f64 * cell,
            y: wall.y as f64 * cell,
            w: cell,
            h: cell,
            color: WALL,
        });
    }

    for (player, pos) in board.player_positions.iter() {
        marker(&mut ops, pos, cell, token_color(player), player.number().to_string());
    }
    for (player, pos) in board.end_positions.iter() {
        marker(&mut ops, pos, cell, end_color(player), "E".to_string());
    }
    ops
}

fn marker(ops: &mut Vec<DrawOp>, pos: Cell, cell: f64, color: &'static str, text: String) {
    let cx = pos.x as f64 * cell + cell / 2.0;
    let cy = pos.y as f64 * cell + cell / 2.0;
    ops.push(DrawOp::Disc {
        cx,
        cy,
        r: cell / 2.0 - 2.0,
        color,
    });
    ops.push(DrawOp::Label {
        text,
        cx,
        cy,
        color: LABEL,
    });
}

pub fn paint(ctx: &CanvasRenderingContext2d, ops: &[DrawOp]) {
    ctx.set_line_width(1.0);
    ctx.set_font(LABEL_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for op in ops {
        match op {
            DrawOp::Fill { x, y, w, h, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(*x, *y, *w, *h);
            }
            DrawOp::Line { from, to, color } => {
                ctx.set_stroke_style_str(color);
                ctx.begin_path();
                ctx.move_to(from.0, from.1);
                ctx.line_to(to.0, to.1);
                ctx.stroke();
            }
            DrawOp::Disc { cx, cy, r, color } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.arc(*cx, *cy, *r, 0.0, std::f64::consts::PI * 2.0).ok();
                ctx.fill();
            }
            DrawOp::Label { text, cx, cy, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_text(text, *cx, *cy).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_is_background_and_grid() {
        let ops = build_scene(&BoardState::default(), &ClientConfig::default());
        // 21 vertical + 16 horizontal lines on an 800x600 canvas with 40px cells.
        assert_eq!(ops.len(), 1 + 21 + 16);
        assert!(matches!(ops[0], DrawOp::Fill { color: BACKGROUND, .. }));
        assert!(ops[1..].iter().all(|op| matches!(op, DrawOp::Line { .. })));
    }

    #[test]
    fn markers_are_drawn_over_walls() {
        let mut board = BoardState::default();
        board.walls.push(Cell::new(1, 1));
        board.player_positions.player2 = Some(Cell::new(2, 3));
        board.end_positions.player1 = Some(Cell::new(0, 0));
        let ops = build_scene(&board, &ClientConfig::default());
        let tail = &ops[1 + 21 + 16..];
        assert_eq!(
            tail,
            &[
                DrawOp::Fill { x: 40.0, y: 40.0, w: 40.0, h: 40.0, color: WALL },
                DrawOp::Disc { cx: 100.0, cy: 140.0, r: 18.0, color: "#0000ff" },
                DrawOp::Label { text: "2".into(), cx: 100.0, cy: 140.0, color: LABEL },
                DrawOp::Disc { cx: 20.0, cy: 20.0, r: 18.0, color: "#ff9999" },
                DrawOp::Label { text: "E".into(), cx: 20.0, cy: 20.0, color: LABEL },
            ]
        );
    }

    #[test]
    fn scene_is_a_pure_function_of_the_board() {
        let mut board = BoardState::default();
        board.player_positions.player1 = Some(Cell::new(4, 4));
        board.walls.push(Cell::new(5, 4));
        let cfg = ClientConfig::default();
        assert_eq!(build_scene(&board, &cfg), build_scene(&board.clone(), &cfg));
    }
}
