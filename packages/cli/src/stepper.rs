//! Interactive sequence stepping.
//!
//! Mirrors the map's step buttons and slider in the terminal: every action
//! updates the session and prints the re-labelled symbols.

use dialoguer::{Input, Select};
use prop_map_session::controls::ControlEvent;
use prop_map_session::geojson_renderer::GeoJsonRenderer;
use prop_map_session::{MapSession, SequenceState};
use prop_map_symbols_models::StepDirection;

/// What the user can do at each prompt.
enum Action {
    Forward,
    Reverse,
    Jump,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[Self::Forward, Self::Reverse, Self::Jump, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Forward => "Step forward",
            Self::Reverse => "Step back",
            Self::Jump => "Move slider to...",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the prompt loop until the user quits.
///
/// # Errors
///
/// Returns an error if the session is not sequenced or a prompt fails.
pub fn run(session: &mut MapSession<GeoJsonRenderer>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(initial) = session.sequence_state() else {
        return Err(format!("{} has no attribute sequence", session.dataset().id).into());
    };
    print_state(session, &initial);

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("Sequence")
            .items(&labels)
            .default(0)
            .interact()?;

        let event = match Action::ALL[idx] {
            Action::Forward => ControlEvent::Step {
                direction: StepDirection::Forward,
            },
            Action::Reverse => ControlEvent::Step {
                direction: StepDirection::Reverse,
            },
            Action::Jump => {
                let value: i64 = Input::new()
                    .with_prompt("Slider position")
                    .default(0)
                    .interact_text()?;
                ControlEvent::SliderInput { value }
            }
            Action::Quit => return Ok(()),
        };

        let state = session.handle(event)?;
        print_state(session, &state);
    }
}

fn print_state(session: &MapSession<GeoJsonRenderer>, state: &SequenceState) {
    println!();
    println!(
        "[{}/{}] {}",
        state.index,
        state.slider.max,
        state.attribute.as_deref().unwrap_or("-")
    );
    for marker in session.renderer().markers() {
        println!("  r={:>6.2}  {}", marker.radius, marker.popup);
    }
    println!();
}
