use leptos::ev::KeyboardEvent;
use leptos::html;
use leptos::leptos_dom::helpers::{request_animation_frame, window};
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Title};

use crate::api;
use crate::grid::{self, FocusMove, RowState, MAX_ROWS, WORD_LEN};
use crate::model::Attempt;

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];
const FALLBACK_GAME_OVER_MESSAGE: &str = "Game over!";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Heptle" />
        <main class="page">
            <h1>"Heptle"</h1>
            <Game />
        </main>
    }
}

/// The grid controller: renders the attempt grid, the virtual keyboard, and
/// the end-of-game popup, and issues the three server calls. The attempt
/// history signal is the single source of truth; which row is active, every
/// cell's feedback class, and the keyboard key states are all derived from
/// it on each render.
#[component]
fn Game() -> impl IntoView {
    let attempts = RwSignal::new(Vec::<Attempt>::new());
    let popup_message = RwSignal::new(None::<String>);

    // One input handle per column, bound to whichever row is active.
    let cell_refs: [NodeRef<html::Input>; WORD_LEN] = std::array::from_fn(|_| NodeRef::new());

    // Row 0 is interactive from the first render; the fetched history may
    // activate a later row once it arrives.
    // NOTE: This effect does not capture any reactive values, so it won't run again.
    Effect::new(move || {
        spawn_local(async move {
            match api::fetch_attempts().await {
                Ok(history) => attempts.set(history),
                Err(e) => error!("failed to load attempt history: {e}"),
            }
        });
    });

    let submit_active_row = move || {
        let letters: Vec<String> = cell_refs
            .iter()
            .map(|cell| cell.get().map(|input| input.value()).unwrap_or_default())
            .collect();
        match grid::assemble_guess(&letters) {
            Ok(guess) => {
                spawn_local(async move {
                    match api::submit_guess(&guess).await {
                        Ok(outcome) => {
                            attempts.set(outcome.attempts);
                            if outcome.game_over {
                                popup_message.set(Some(outcome.game_over_message.unwrap_or_else(
                                    || FALLBACK_GAME_OVER_MESSAGE.to_string(),
                                )));
                            }
                            // The next row's inputs exist only after the grid
                            // re-renders, so focus them on the following frame.
                            request_animation_frame(move || focus_cell(cell_refs[0]));
                        }
                        Err(e) => error!("guess submission failed: {e}"),
                    }
                });
            }
            Err(incomplete) => {
                window()
                    .alert_with_message(&incomplete.to_string())
                    .unwrap_or_default();
            }
        }
    };

    let on_input = move |col: usize| {
        let value = cell_refs[col]
            .get()
            .map(|input| input.value())
            .unwrap_or_default();
        if let FocusMove::Advance(next) = grid::entry_transition(col, &value) {
            focus_cell(cell_refs[next]);
        }
    };

    let on_keydown = move |col: usize, ev: KeyboardEvent| {
        let value = cell_refs[col]
            .get()
            .map(|input| input.value())
            .unwrap_or_default();
        match grid::key_transition(col, &ev.key(), &value) {
            FocusMove::Retreat(prev) => focus_cell(cell_refs[prev]),
            FocusMove::Submit => submit_active_row(),
            FocusMove::Advance(_) | FocusMove::Stay => {}
        }
    };

    let reset = move |_| {
        spawn_local(async move {
            // Clearing the grid is sequenced after the server acknowledges.
            match api::reset_game().await {
                Ok(()) => {
                    attempts.set(Vec::new());
                    popup_message.set(None);
                }
                Err(e) => error!("failed to reset the game: {e}"),
            }
        });
    };

    let grid_rows = move || {
        let count = attempts.with(|a| a.len());
        (0..MAX_ROWS)
            .map(|row| match grid::row_state(count, row) {
                RowState::Submitted => {
                    let cells = attempts.with(|a| grid::filled_cells(&a[row]));
                    view! {
                        <div class="attempt-row">
                            {cells
                                .into_iter()
                                .map(|(letter, status)| {
                                    let class = match status {
                                        Some(status) => format!("letter-box {}", status.css_class()),
                                        None => "letter-box".to_string(),
                                    };
                                    view! { <div class=class>{letter.unwrap_or(' ')}</div> }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
                RowState::Active => view! {
                    <div class="attempt-row">
                        {(0..WORD_LEN)
                            .map(|col| {
                                view! {
                                    <div class="letter-box">
                                        <input
                                            type="text"
                                            class="letter-input"
                                            maxlength="1"
                                            node_ref=cell_refs[col]
                                            on:input=move |_| on_input(col)
                                            on:keydown=move |ev| on_keydown(col, ev)
                                        />
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any(),
                RowState::Untouched => view! {
                    <div class="attempt-row">
                        {(0..WORD_LEN)
                            .map(|_| view! { <div class="letter-box"></div> })
                            .collect_view()}
                    </div>
                }
                .into_any(),
            })
            .collect_view()
    };

    let key_states = Memo::new(move |_| attempts.with(|a| grid::keyboard_status(a)));

    view! {
        <div id="attemptsContainer" class="grid">{grid_rows}</div>

        <div class="keyboard">
            {KEYBOARD_ROWS
                .iter()
                .map(|row_letters| {
                    view! {
                        <div class="keyboard-row">
                            {row_letters
                                .chars()
                                .map(|letter| {
                                    let class = move || {
                                        key_states.with(|keys| match keys.get(&letter) {
                                            Some(status) => format!("key {}", status.css_class()),
                                            None => "key".to_string(),
                                        })
                                    };
                                    view! {
                                        <button class=class data-key=letter.to_string()>
                                            {letter}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </div>

        <button id="reset-button" class="reset" on:click=reset>
            "New Game"
        </button>

        <div id="popup" class="popup" class:hidden=move || popup_message.with(|m| m.is_none())>
            <p id="popup-message">{move || popup_message.get().unwrap_or_default()}</p>
            <button id="close-popup" on:click=move |_| popup_message.set(None)>
                "Close"
            </button>
        </div>
    }
}

fn focus_cell(cell: NodeRef<html::Input>) {
    if let Some(input) = cell.get() {
        let _ = input.focus();
    }
}
