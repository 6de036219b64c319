use lotoia_core::{ChatHistory, ChatRequest, ChatRole, ChatTurn, GameKind};
use yew::prelude::*;

use crate::i18n::t;
use crate::storage::{BrowserStore, session_id};
use crate::tasks::spawn;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub kind: GameKind,
}

fn turn_view(turn: &ChatTurn) -> Html {
    let class = match turn.role {
        ChatRole::User => "chat-turn chat-user",
        ChatRole::Assistant if turn.notice => "chat-turn chat-assistant chat-notice",
        ChatRole::Assistant => "chat-turn chat-assistant",
    };
    html! { <li {class}>{ turn.content.clone() }</li> }
}

/// Per-game chat panel. History lives in session storage; a failed request
/// appends a localized notice that is never sent back to the backend.
#[function_component(ChatWidget)]
pub fn chat_widget(p: &Props) -> Html {
    let kind = p.kind;
    let history = use_mut_ref(|| ChatHistory::load(&BrowserStore::Session, kind));
    let draft = use_state(String::new);
    let pending = use_state(|| false);
    let update = use_force_update();

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                draft.set(input.value());
            }
        })
    };

    let on_submit = {
        let history = history.clone();
        let draft = draft.clone();
        let pending = pending.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let message = draft.trim().to_string();
            if message.is_empty() || *pending {
                return;
            }
            let request = {
                let mut chat = history.borrow_mut();
                let request = ChatRequest::new(&message, &chat, &session_id());
                chat.push(ChatTurn::user(message));
                chat.save(&BrowserStore::Session, kind);
                request
            };
            draft.set(String::new());
            pending.set(true);
            update.force_update();

            let history = history.clone();
            let pending = pending.clone();
            let update = update.clone();
            spawn(async move {
                let turn = match crate::api::post_chat(kind, &request).await {
                    Ok(reply) => ChatTurn::assistant(reply.response),
                    Err(err) => {
                        log::warn!("{kind} chat request failed: {err}");
                        ChatTurn::notice(t("chat.error"))
                    }
                };
                {
                    let mut chat = history.borrow_mut();
                    chat.push(turn);
                    chat.save(&BrowserStore::Session, kind);
                }
                pending.set(false);
                update.force_update();
            });
        })
    };

    let turns = history.borrow().iter().map(turn_view).collect::<Html>();
    let empty = history.borrow().is_empty();
    html! {
        <section class="chat-widget" aria-labelledby="chat-title">
            <h2 id="chat-title">{ t("chat.title") }</h2>
            <ul class="chat-log" aria-live="polite">
                if empty {
                    <li class="chat-empty">{ t("chat.empty") }</li>
                }
                { turns }
            </ul>
            <form class="chat-form" onsubmit={on_submit}>
                <input
                    type="text"
                    class="chat-input"
                    value={(*draft).clone()}
                    placeholder={t("chat.placeholder")}
                    aria-label={t("chat.placeholder")}
                    oninput={on_input}
                />
                <button type="submit" disabled={*pending}>{ t("chat.send") }</button>
            </form>
        </section>
    }
}
