use tetris::core::Session;
use tetris::input::InputHandler;
use tetris::term::{encode_diff_into, AnchorY, BlockSheet, FrameBuffer, GameView, Viewport};
use tetris::types::{Cell, Intent};

fn view() -> GameView {
    GameView::new(BlockSheet::embedded().unwrap()).with_anchor_y(AnchorY::Top)
}

#[test]
fn term_view_renders_border_corners() {
    let snap = Session::new(1).snapshot();

    // 10 cells * 2 columns + border by 20 rows + border.
    let fb = view().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = Session::new(1).snapshot();
    snap.cells[0][0] = Cell::Cyan;
    snap.ghost = None;

    let fb = view().render(&snap, Viewport::new(22, 22));

    // Bottom-left cell sits just above the bottom border.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_ne!(fb.get(3, 20).unwrap().ch, '█');
}

#[test]
fn term_view_hides_spawn_buffer() {
    // The fresh piece sits in rows 20..=21, above the visible field.
    let snap = Session::new(1).snapshot();
    assert!(snap.active.unwrap().points.iter().all(|p| p.row >= 20));

    let fb = view().render(&snap, Viewport::new(22, 22));
    let solid = fb.cells().iter().filter(|c| c.ch == '█').count();
    assert_eq!(solid, 0);
}

#[test]
fn gameplay_frames_diff_incrementally() {
    let mut session = Session::new(8);
    let view = view();
    let vp = Viewport::new(80, 24);

    let mut prev = FrameBuffer::new(0, 0);
    view.render_into(&session.snapshot(), vp, &mut prev);

    session.apply(Intent::HardDrop);
    let mut next = FrameBuffer::new(0, 0);
    view.render_into(&session.snapshot(), vp, &mut next);

    assert_ne!(prev, next);
    let mut out = Vec::new();
    encode_diff_into(&prev, &next, &mut out).unwrap();
    assert!(!out.is_empty());
}

#[test]
fn input_intents_drive_the_session() {
    use crossterm::event::KeyCode;

    let mut session = Session::new(8);
    let mut input = InputHandler::new().with_key_release_timeout_ms(10_000);

    let intent = input.handle_key_press(KeyCode::Char(' ')).unwrap();
    assert_eq!(intent, Intent::HardDrop);
    session.apply(intent);
    assert_eq!(session.score(), 12);

    let pause = input.handle_key_press(KeyCode::Char('p')).unwrap();
    session.apply(pause);
    assert!(session.paused());
}
