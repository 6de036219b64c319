use yew::prelude::*;

use crate::i18n;

#[derive(Properties, Clone, PartialEq)]
pub struct GateProps {
    pub duration_ms: u32,
    pub on_cancel: Callback<()>,
}

/// Blocking sponsor animation. The timer lives in the runner; this overlay
/// only renders the countdown bar and the cancel button, which aborts the
/// analysis.
#[function_component(SponsorGate)]
pub fn sponsor_gate(p: &GateProps) -> Html {
    let on_cancel = {
        let cb = p.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="sponsor-gate" role="dialog" aria-modal="true" aria-labelledby="sponsor-gate-title">
            <div class="sponsor-gate-card">
                <p id="sponsor-gate-title">{ i18n::t("gate.title") }</p>
                <div class="sponsor-progress" style={format!("animation-duration:{}ms", p.duration_ms)}></div>
                <button type="button" class="sponsor-cancel" onclick={on_cancel}>{ i18n::t("gate.cancel") }</button>
            </div>
        </div>
    }
}
