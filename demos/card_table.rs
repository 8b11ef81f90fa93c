//=========================================================================
// Card Table Demo
//=========================================================================
//
// Opens a window with one invisible card in the middle. Hover, click and
// drag it; the requested transitions are printed by a stand-in animator
// thread that completes them after their duration.
//
// Run with:
//   cargo run --example card_table
//
//=========================================================================

use std::rc::Rc;
use std::thread;

use card_gestures::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let card = Card::new(TargetId(1)).with_drag_factor(4.0);

    let mut input = InputManager::builder(WindowSurface::new(800.0, 600.0))
        .with_hit_target(ScreenRegion::centered(ScreenPoint::new(0.0, 0.0), 0.2, 0.3))
        .build();
    input.register(card.actions().table()?)?;

    let (animator, queue) = ChannelAnimator::new(64);
    let mut card = card;
    card.bind(input.bus(), Rc::new(animator));

    input.on(&card.actions().selected, |state| {
        let pointer = state.pointer().position();
        println!("selected at ({:.2}, {:.2})", pointer.x, pointer.y);
    });

    // Escape releases every listener; the window stays open until closed.
    let teardown = input.teardown_handle();
    let quit = ActionTable::builder()
        .action("quit", |a| a.on_gated("keyup", |event, _| event.key() == Some(KeyCode::Escape)))
        .build()?;
    input.register(quit)?;
    input.on("quit", move |_| teardown.request());

    thread::spawn(move || {
        for pending in queue.iter() {
            let request = pending.request();
            println!(
                "{} {:?} -> {:.3} over {:?} [{} .. {}]",
                request.target,
                request.property,
                request.to,
                request.duration,
                pending.start_label(),
                pending.end_label()
            );
            thread::sleep(request.duration);
            pending.complete();
        }
    });

    Platform::new(input).with_title("Card Table").run()?;
    Ok(())
}
