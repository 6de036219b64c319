//! Executes simulator effects in the browser.
//!
//! The [`Runner`] owns nothing but a shared handle to the [`Simulator`] and a
//! re-render callback. Every completion re-enters through [`Runner::dispatch`];
//! the `RefCell` borrow is always released before anything is awaited.
use std::cell::RefCell;
use std::rc::Rc;

use lotoia_core::{Action, DebouncePhase, Effect, GateOutcome, Simulator};
use yew::Callback;

use crate::api;
use crate::i18n;
use crate::tasks::{sleep, spawn};
use crate::theme::set_status;

#[derive(Clone)]
pub struct Runner {
    sim: Rc<RefCell<Simulator>>,
    refresh: Callback<()>,
}

impl PartialEq for Runner {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.sim, &other.sim)
    }
}

impl Runner {
    #[must_use]
    pub const fn new(sim: Rc<RefCell<Simulator>>, refresh: Callback<()>) -> Self {
        Self { sim, refresh }
    }

    /// Apply `action`, re-render, then start whatever the simulator asked for.
    pub fn dispatch(&self, action: Action) {
        let serial_before = self.sim.borrow().result_serial();
        let effects = self.sim.borrow_mut().apply(action);
        if self.sim.borrow().result_serial() != serial_before {
            set_status(&i18n::t("status.analysis_ready"));
        }
        self.refresh.emit(());
        for effect in effects {
            self.run(effect);
        }
    }

    /// The two loads every simulator page performs once.
    pub fn mount(&self) {
        let (heat_path, info_path) = self.sim.borrow().mount_paths();
        let runner = self.clone();
        spawn(async move {
            let heat = api::fetch_heat(&heat_path).await;
            runner.dispatch(Action::HeatLoaded(heat));
        });
        let runner = self.clone();
        spawn(async move {
            let info = api::fetch_database_info(&info_path).await;
            runner.dispatch(Action::DatabaseInfoLoaded(info));
        });
    }

    /// Skip button of the sponsor gate.
    pub fn cancel_gate(&self) {
        let DebouncePhase::AwaitingGate { ticket } = self.sim.borrow().phase() else {
            return;
        };
        self.dispatch(Action::GateResolved {
            ticket,
            outcome: GateOutcome::Cancelled,
        });
    }

    fn run(&self, effect: Effect) {
        let runner = self.clone();
        match effect {
            Effect::ScheduleDebounce { ticket, delay_ms } => spawn(async move {
                sleep(delay_ms).await;
                runner.dispatch(Action::DebounceElapsed(ticket));
            }),
            Effect::OpenGate {
                ticket,
                duration_ms,
            } => {
                set_status(&i18n::t("status.gate_open"));
                spawn(async move {
                    sleep(duration_ms).await;
                    runner.dispatch(Action::GateResolved {
                        ticket,
                        outcome: GateOutcome::Completed,
                    });
                });
            }
            Effect::Analyze { ticket, path } => spawn(async move {
                let result = api::analyze(&path).await;
                runner.dispatch(Action::AnalysisArrived { ticket, result });
            }),
            Effect::Generate { ticket, path } => spawn(async move {
                let grid = api::generate(&path).await;
                runner.dispatch(Action::GridGenerated { ticket, grid });
            }),
        }
    }
}
