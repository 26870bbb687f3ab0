use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use sciviz_lib::playback::{OutputDevice, PlaybackTracker};

pub struct StatusSnapshot {
    pub text: String,
}

pub struct StatusArgs {
    pub time: f64,
    pub duration: f64,
    pub playing: bool,
    pub restarting: bool,
    pub gain: f32,
}

pub fn status_text(args: StatusArgs) -> StatusSnapshot {
    let state = if args.restarting {
        "↻ Restarting"
    } else if args.playing {
        "▶ Playing"
    } else {
        "⏸ Paused"
    };
    let current = format_time(args.time.min(args.duration) * 1000.0);
    let total = format_time(args.duration * 1000.0);
    let percent = if args.duration > 0.0 {
        (args.time / args.duration * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    let text = format!(
        "{}   {} / {}   ({:>5.1}%)\nGain: {:.0}",
        state, current, total, percent, args.gain
    );

    StatusSnapshot { text }
}

/// Apply one pending key press. Returns `false` when the user quits.
pub fn handle_key_event<D: OutputDevice>(tracker: &mut PlaybackTracker<D>) -> bool {
    if event::poll(Duration::from_millis(100)).unwrap_or(false) {
        if let Ok(Event::Key(key)) = event::read() {
            if key.kind != KeyEventKind::Press {
                return true;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    tracker.pause();
                    return false;
                }
                KeyCode::Char(' ') | KeyCode::Char('p') => tracker.toggle(),
                KeyCode::Char('r') | KeyCode::Char('R') => tracker.restart(),
                _ => {}
            }
        }
    }

    true
}

fn format_time(time: f64) -> String {
    let seconds = (time / 1000.0).ceil() as u32;
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    let hours = minutes / 60;
    let minutes = minutes % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
