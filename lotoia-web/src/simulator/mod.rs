//! The grid simulator widget: pickers, controls, sponsor gate and results.
mod grid;
mod history;
mod results;
mod runner;
mod sponsor_gate;
mod suggestions;

pub use grid::{GridProps, NumberGrid, heat_tooltip};
pub use history::{HistoryBlock, HistoryProps, history_text};
pub use results::{ResultsPanel, ResultsProps};
pub use runner::Runner;
pub use sponsor_gate::{GateProps, SponsorGate};
pub use suggestions::{SuggestionList, SuggestionProps};

use std::cell::RefCell;
use std::rc::Rc;

use lotoia_core::constants::SPONSOR_GATE_MS;
use lotoia_core::{
    Action, Category, DebouncePhase, GameKind, GateMode, MetricBands, Simulator, grid_cells,
};
use yew::prelude::*;

use crate::components::DbInfo;
use crate::i18n;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub kind: GameKind,
    #[prop_or_default]
    pub gate_mode: GateMode,
}

/// Render the widget for an existing simulator. Split out so server-side
/// tests can render arbitrary states.
#[must_use]
pub fn render_simulator(sim: &Simulator, runner: Option<&Runner>) -> Html {
    let kind = sim.kind();
    let dispatch = |make: fn(u8) -> Action| {
        let runner = runner.cloned();
        Callback::from(move |n: u8| {
            if let Some(runner) = &runner {
                runner.dispatch(make(n));
            }
        })
    };
    let on_click = |action: Action| {
        let runner = runner.cloned();
        Callback::from(move |_: MouseEvent| {
            if let Some(runner) = &runner {
                runner.dispatch(action.clone());
            }
        })
    };
    let on_cancel_gate = {
        let runner = runner.cloned();
        Callback::from(move |()| {
            if let Some(runner) = &runner {
                runner.cancel_gate();
            }
        })
    };

    let selection = sim.selection();
    let primary = grid_cells(selection, Category::Primary, sim.heat());
    let secondary = grid_cells(selection, Category::Secondary, sim.heat());
    let gate_open = matches!(sim.phase(), DebouncePhase::AwaitingGate { .. });
    let analyzing = matches!(sim.phase(), DebouncePhase::Analyzing { .. });
    let result = sim.result_view(MetricBands::default_config());

    html! {
        <div class={classes!("simulator", format!("simulator-{}", kind.slug()))}>
            <DbInfo info={sim.database_info().cloned()} />
            <NumberGrid
                category={Category::Primary}
                cells={primary}
                label={i18n::t("grid.primary")}
                on_toggle={dispatch(Action::TogglePrimary)}
            />
            <NumberGrid
                category={Category::Secondary}
                cells={secondary}
                label={i18n::t(kind.secondary_i18n_key())}
                on_toggle={dispatch(Action::ToggleSecondary)}
            />
            <div class="simulator-controls">
                <button
                    type="button"
                    class="btn-generate"
                    disabled={sim.is_generating()}
                    onclick={on_click(Action::AutoGenerate)}
                >
                    { i18n::t("grid.auto_generate") }
                </button>
                <button type="button" class="btn-reset" onclick={on_click(Action::Reset)}>
                    { i18n::t("grid.reset") }
                </button>
            </div>
            if !selection.is_complete() {
                <p class="selection-hint">{ i18n::t("grid.hint") }</p>
            }
            if analyzing {
                <p class="analysis-pending" aria-busy="true">{ i18n::t("results.loading") }</p>
            }
            if gate_open {
                <SponsorGate duration_ms={SPONSOR_GATE_MS} on_cancel={on_cancel_gate} />
            }
            if let Some(view) = result {
                <ResultsPanel {view} serial={sim.result_serial()} />
            }
        </div>
    }
}

#[function_component(SimulatorPanel)]
pub fn simulator_panel(p: &Props) -> Html {
    let sim = use_mut_ref(|| Simulator::new(p.kind, p.gate_mode));
    let update = use_force_update();
    let runner = {
        let sim: Rc<RefCell<Simulator>> = sim.clone();
        use_memo((), move |_| {
            Runner::new(sim, Callback::from(move |()| update.force_update()))
        })
    };

    {
        let runner = (*runner).clone();
        use_effect_with((), move |_| {
            runner.mount();
            || ()
        });
    }

    let html = render_simulator(&sim.borrow(), Some(&runner));
    html
}
