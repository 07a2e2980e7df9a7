pub mod api;
pub mod candidates;
pub mod cards;
pub mod deck;
pub mod session;

use candidates::SwipeCandidate;
use cards::{SwipeCard, SwipeControls};
use deck::{Decision, SwipeDeck};
use log::{error, warn};
use session::{clear_session, load_session, save_session, Role, Session};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

#[derive(PartialEq, Clone, Copy)]
enum AuthMode {
    SignIn,
    Register,
}

#[derive(PartialEq, Clone, Copy)]
enum Tab {
    Swipe,
    Matches,
}

type DeckHandle = UseStateHandle<Option<SwipeDeck<SwipeCandidate>>>;

/// Pure local advance first, then a detached recording call. The two are
/// deliberately not linked: a failed request is logged and dropped, and the
/// deck does not roll back.
fn decide(deck_handle: &DeckHandle, token: &str, decision: Decision) {
    let Some(mut deck) = (**deck_handle).clone() else {
        return;
    };
    let Some(candidate) = deck.current().cloned() else {
        return;
    };

    match decision {
        Decision::Like => deck.like(),
        Decision::Pass => deck.pass(),
    }
    deck_handle.set(Some(deck));

    let token = token.to_owned();
    spawn_local(async move {
        if let Err(err) = api::record_swipe(&token, &candidate.id, decision).await {
            error!(
                "Failed to record {} for {}: {err}",
                decision.as_str(),
                candidate.id
            );
        }
    });
}

fn undo_last(deck_handle: &DeckHandle, token: &str) {
    let Some(mut deck) = (**deck_handle).clone() else {
        return;
    };
    if deck.history().is_empty() {
        return;
    }

    deck.undo();
    deck_handle.set(Some(deck));

    let token = token.to_owned();
    spawn_local(async move {
        if let Err(err) = api::undo_swipe(&token).await {
            error!("Failed to undo last swipe: {err}");
        }
    });
}

#[function_component(App)]
fn app() -> Html {
    let session = use_state(load_session);
    let tab = use_state(|| Tab::Swipe);

    let auth_mode = use_state(|| AuthMode::SignIn);
    let auth_status = use_state(|| FetchStatus::Idle);
    let email = use_state(String::new);
    let password = use_state(String::new);

    let queue_status = use_state(|| FetchStatus::Idle);
    let deck: DeckHandle = use_state(|| None);

    let matches_status = use_state(|| FetchStatus::Idle);
    let matches = use_state(|| None::<Vec<api::Match>>);

    let token = (*session).as_ref().map(|s| s.token.clone());
    let role = (*session).as_ref().and_then(|s| s.role);

    {
        let deck = deck.clone();
        let queue_status = queue_status.clone();

        use_effect_with_deps(
            move |auth: &Option<(String, Role)>| {
                match auth.clone() {
                    Some((token, role)) => {
                        queue_status.set(FetchStatus::Loading);
                        deck.set(None);

                        spawn_local(async move {
                            let queue = match role {
                                Role::Seeker => api::seeker_queue(&token).await.map(|items| {
                                    items
                                        .into_iter()
                                        .map(candidates::from_listing)
                                        .collect::<Vec<_>>()
                                }),
                                Role::Host => api::host_queue(&token).await.map(|items| {
                                    items
                                        .into_iter()
                                        .map(candidates::from_seeker)
                                        .collect::<Vec<_>>()
                                }),
                            };

                            match queue {
                                Ok(candidates) => {
                                    deck.set(Some(SwipeDeck::new(candidates)));
                                    queue_status.set(FetchStatus::Idle);
                                }
                                Err(err) => {
                                    deck.set(None);
                                    queue_status.set(FetchStatus::Error(err.to_string()));
                                }
                            }
                        });
                    }
                    None => {
                        deck.set(None);
                        queue_status.set(FetchStatus::Idle);
                    }
                }

                || ()
            },
            token.clone().zip(role),
        );
    }

    {
        let matches = matches.clone();
        let matches_status = matches_status.clone();

        use_effect_with_deps(
            move |deps: &(Tab, Option<String>)| {
                if let (Tab::Matches, Some(token)) = (deps.0, deps.1.clone()) {
                    matches_status.set(FetchStatus::Loading);
                    spawn_local(async move {
                        match api::my_matches(&token).await {
                            Ok(fetched) => {
                                matches.set(Some(fetched));
                                matches_status.set(FetchStatus::Idle);
                            }
                            Err(err) => {
                                matches.set(None);
                                matches_status.set(FetchStatus::Error(err.to_string()));
                            }
                        }
                    });
                }
                || ()
            },
            (*tab, token.clone()),
        );
    }

    // Keyboard shortcuts: a = pass, d = like, z = undo. Re-registered when
    // the deck snapshot changes so the handler never acts on stale state.
    {
        let deck_handle = deck.clone();
        let token_for_keys = token.clone();
        let deps = ((*deck).clone(), token.clone());

        use_effect_with_deps(
            move |_| {
                let listener = Closure::<dyn Fn(KeyboardEvent)>::wrap(Box::new(
                    move |event: KeyboardEvent| {
                        if event.repeat() {
                            return;
                        }
                        let Some(token) = token_for_keys.as_deref() else {
                            return;
                        };
                        match event.key().as_str() {
                            "a" | "A" => decide(&deck_handle, token, Decision::Pass),
                            "d" | "D" => decide(&deck_handle, token, Decision::Like),
                            "z" | "Z" => undo_last(&deck_handle, token),
                            _ => {}
                        }
                    },
                ));

                if let Some(window) = window() {
                    let _ = window.add_event_listener_with_callback(
                        "keydown",
                        listener.as_ref().unchecked_ref(),
                    );
                }

                move || {
                    if let Some(window) = window() {
                        let _ = window.remove_event_listener_with_callback(
                            "keydown",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            deps,
        );
    }

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            email.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            password.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_toggle_auth_mode = {
        let auth_mode = auth_mode.clone();
        let auth_status = auth_status.clone();
        Callback::from(move |_: MouseEvent| {
            let next = match *auth_mode {
                AuthMode::SignIn => AuthMode::Register,
                AuthMode::Register => AuthMode::SignIn,
            };
            auth_mode.set(next);
            auth_status.set(FetchStatus::Idle);
        })
    };

    let on_auth_submit = {
        let email = email.clone();
        let password = password.clone();
        let auth_mode = auth_mode.clone();
        let auth_status = auth_status.clone();
        let session = session.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let email_value = (*email).trim().to_owned();
            let password_value = (*password).clone();
            if email_value.is_empty() || password_value.is_empty() {
                auth_status.set(FetchStatus::Error(
                    "Enter your university email and a password.".to_owned(),
                ));
                return;
            }

            auth_status.set(FetchStatus::Loading);

            let mode = *auth_mode;
            let auth_status = auth_status.clone();
            let session = session.clone();

            spawn_local(async move {
                let result = match mode {
                    AuthMode::SignIn => {
                        api::login(&api::LoginPayload {
                            email: email_value,
                            password: password_value,
                        })
                        .await
                    }
                    AuthMode::Register => {
                        api::register(&api::RegisterPayload {
                            email: email_value,
                            password: password_value,
                            first_name: None,
                            last_name: None,
                        })
                        .await
                    }
                };

                match result {
                    Ok(auth) => {
                        let new_session = Session {
                            token: auth.token,
                            email: auth.user.email,
                            role: auth.user.role.as_deref().and_then(Role::from_wire),
                        };
                        save_session(&new_session);
                        session.set(Some(new_session));
                        auth_status.set(FetchStatus::Idle);
                    }
                    Err(err) => auth_status.set(FetchStatus::Error(err.to_string())),
                }
            });
        })
    };

    let on_select_role = {
        let session = session.clone();
        Callback::from(move |role: Role| {
            if let Some(mut current) = (*session).clone() {
                current.role = Some(role);
                save_session(&current);
                session.set(Some(current));
            }
        })
    };

    let on_logout = {
        let session = session.clone();
        let deck = deck.clone();
        let tab = tab.clone();
        let matches = matches.clone();

        Callback::from(move |_: MouseEvent| {
            clear_session();
            session.set(None);
            deck.set(None);
            matches.set(None);
            tab.set(Tab::Swipe);

            spawn_local(async {
                if let Err(err) = api::logout().await {
                    warn!("Sign-out call failed: {err}");
                }
            });
        })
    };

    let on_like = {
        let deck = deck.clone();
        let token = token.clone();
        Callback::from(move |_| {
            if let Some(token) = token.as_deref() {
                decide(&deck, token, Decision::Like);
            }
        })
    };

    let on_pass = {
        let deck = deck.clone();
        let token = token.clone();
        Callback::from(move |_| {
            if let Some(token) = token.as_deref() {
                decide(&deck, token, Decision::Pass);
            }
        })
    };

    let on_undo = {
        let deck = deck.clone();
        let token = token.clone();
        Callback::from(move |_| {
            if let Some(token) = token.as_deref() {
                undo_last(&deck, token);
            }
        })
    };

    let on_toggle_expand = {
        let deck = deck.clone();
        Callback::from(move |id: String| {
            if let Some(mut current) = (*deck).clone() {
                current.toggle_expand(&id);
                deck.set(Some(current));
            }
        })
    };

    let content = match (*session).clone() {
        None => render_auth(
            *auth_mode,
            &auth_status,
            &email,
            &password,
            on_email_input,
            on_password_input,
            on_auth_submit,
            on_toggle_auth_mode,
        ),
        Some(current) => match current.role {
            None => render_role_select(&on_select_role),
            Some(role) => {
                let tab_nav = render_tab_nav(&tab);
                let body = match *tab {
                    Tab::Swipe => render_swipe_area(
                        role,
                        &queue_status,
                        &deck,
                        &on_like,
                        &on_pass,
                        &on_undo,
                        &on_toggle_expand,
                    ),
                    Tab::Matches => render_matches(&matches_status, &matches),
                };
                html! {
                    <>
                        { tab_nav }
                        { body }
                    </>
                }
            }
        },
    };

    let account_bar = (*session).as_ref().map(|current| {
        html! {
            <div class="account-bar">
                <span class="account-email">{ &current.email }</span>
                <button class="logout-button" onclick={on_logout.clone()}>{ "Sign out" }</button>
            </div>
        }
    });

    html! {
        <div class="app-container">
            <header class="top-bar">
                <h1>{ "Sublet Swipe" }</h1>
                { account_bar.unwrap_or_default() }
            </header>
            <main class="content">
                { content }
            </main>
        </div>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_auth(
    mode: AuthMode,
    status: &UseStateHandle<FetchStatus>,
    email: &UseStateHandle<String>,
    password: &UseStateHandle<String>,
    on_email_input: Callback<InputEvent>,
    on_password_input: Callback<InputEvent>,
    on_submit: Callback<SubmitEvent>,
    on_toggle_mode: Callback<MouseEvent>,
) -> Html {
    let (heading, submit_label, switch_label) = match mode {
        AuthMode::SignIn => ("Sign in", "Sign in", "Need an account? Create one"),
        AuthMode::Register => ("Create account", "Create account", "Have an account? Sign in"),
    };

    let busy = matches!(&**status, FetchStatus::Loading);

    html! {
        <form class="auth-form" onsubmit={on_submit}>
            <h2>{ heading }</h2>
            {
                if let FetchStatus::Error(message) = &**status {
                    html! { <p class="error-banner">{ message }</p> }
                } else {
                    html! {}
                }
            }
            <label>
                { "University email" }
                <input
                    type="email"
                    value={(**email).clone()}
                    oninput={on_email_input}
                    disabled={busy}
                />
            </label>
            <label>
                { "Password" }
                <input
                    type="password"
                    value={(**password).clone()}
                    oninput={on_password_input}
                    disabled={busy}
                />
            </label>
            <button type="submit" disabled={busy}>
                { if busy { "Working…" } else { submit_label } }
            </button>
            <button type="button" class="mode-switch" onclick={on_toggle_mode}>
                { switch_label }
            </button>
        </form>
    }
}

fn render_role_select(on_select_role: &Callback<Role>) -> Html {
    let pick = |role: Role, on_select_role: &Callback<Role>| {
        let on_select_role = on_select_role.clone();
        Callback::from(move |_: MouseEvent| on_select_role.emit(role))
    };

    html! {
        <div class="role-select">
            <h2>{ "How are you using Sublet Swipe?" }</h2>
            <button class="role-button" onclick={pick(Role::Seeker, on_select_role)}>
                { "I'm looking for a place" }
            </button>
            <button class="role-button" onclick={pick(Role::Host, on_select_role)}>
                { "I have a place to sublet" }
            </button>
        </div>
    }
}

fn render_tab_nav(tab: &UseStateHandle<Tab>) -> Html {
    let select = |target: Tab, tab: &UseStateHandle<Tab>| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };

    let class_for = |target: Tab| {
        if **tab == target {
            "tab-button active"
        } else {
            "tab-button"
        }
    };

    html! {
        <nav class="tab-nav">
            <button class={class_for(Tab::Swipe)} onclick={select(Tab::Swipe, tab)}>
                { "Swipe" }
            </button>
            <button class={class_for(Tab::Matches)} onclick={select(Tab::Matches, tab)}>
                { "Matches" }
            </button>
        </nav>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_swipe_area(
    role: Role,
    status: &UseStateHandle<FetchStatus>,
    deck: &DeckHandle,
    on_like: &Callback<()>,
    on_pass: &Callback<()>,
    on_undo: &Callback<()>,
    on_toggle_expand: &Callback<String>,
) -> Html {
    let (heading, blurb, rent_heading) = match role {
        Role::Seeker => (
            "Match with hosts",
            "Review each listing to find the right place for you.",
            "Estimated Rent",
        ),
        Role::Host => (
            "Match with seekers",
            "Review each seeker to find the right fit for your place.",
            "Budget",
        ),
    };

    let body = match &**status {
        FetchStatus::Loading => html! { <p class="deck-placeholder">{ "Loading your queue…" }</p> },
        FetchStatus::Error(message) => html! { <p class="error-banner">{ message }</p> },
        FetchStatus::Idle => {
            let Some(deck_state) = (&**deck).as_ref() else {
                return html! { <p class="deck-placeholder">{ "No queue loaded yet." }</p> };
            };

            // UX-only gating; the deck itself absorbs calls it cannot act on.
            let controls_disabled =
                deck_state.current().is_none() && deck_state.history().is_empty();

            let controls = html! {
                <SwipeControls
                    on_pass={on_pass.clone()}
                    on_undo={on_undo.clone()}
                    on_like={on_like.clone()}
                    disabled={controls_disabled}
                />
            };

            let behind = deck_state.peek_next().map(|next| {
                html! {
                    <div class="card-behind">
                        <SwipeCard
                            candidate={next.clone()}
                            expanded={deck_state.is_expanded(&next.id)}
                            on_toggle={on_toggle_expand.clone()}
                            background=true
                            rent_heading={rent_heading}
                        />
                    </div>
                }
            });

            let front = match deck_state.current() {
                Some(current) => html! {
                    <div class="card-front">
                        <SwipeCard
                            candidate={current.clone()}
                            expanded={deck_state.is_expanded(&current.id)}
                            on_toggle={on_toggle_expand.clone()}
                            rent_heading={rent_heading}
                        >
                            { controls }
                        </SwipeCard>
                    </div>
                },
                None => html! {
                    <div class="empty-state">
                        <p>{ "You have reached the end of your queue." }</p>
                        { controls }
                    </div>
                },
            };

            html! {
                <div class="card-stack">
                    { behind.unwrap_or_default() }
                    { front }
                </div>
            }
        }
    };

    html! {
        <section class="swipe-page">
            <h2>{ heading }</h2>
            <p class="page-blurb">{ blurb }</p>
            { body }
        </section>
    }
}

fn render_matches(
    status: &UseStateHandle<FetchStatus>,
    matches: &UseStateHandle<Option<Vec<api::Match>>>,
) -> Html {
    let body = match &**status {
        FetchStatus::Loading => html! { <p class="deck-placeholder">{ "Loading matches…" }</p> },
        FetchStatus::Error(message) => html! { <p class="error-banner">{ message }</p> },
        FetchStatus::Idle => {
            let Some(entries) = (&**matches).as_ref() else {
                return html! { <p class="deck-placeholder">{ "No matches loaded yet." }</p> };
            };

            if entries.is_empty() {
                html! { <p class="deck-placeholder">{ "No matches yet. Keep swiping!" }</p> }
            } else {
                html! {
                    <ul class="match-list">
                        { for entries.iter().map(render_match) }
                    </ul>
                }
            }
        }
    };

    html! {
        <section class="matches-page">
            <h2>{ "Your matches" }</h2>
            { body }
        </section>
    }
}

fn render_match(entry: &api::Match) -> Html {
    let status_label = match entry.status {
        api::MatchStatus::Mutual => "Mutual match",
        api::MatchStatus::Pending => "Pending",
    };

    let name = entry
        .target_profile
        .as_ref()
        .and_then(|profile| {
            profile
                .get("name")
                .or_else(|| profile.get("title"))
                .and_then(|value| value.as_str())
        })
        .unwrap_or("Unknown");

    let score = entry.score.map(|score| format!("{:.0}% fit", score * 100.0));

    html! {
        <li class="match-card" key={entry.id.clone()}>
            <p class="match-name">{ name }</p>
            <p class="match-status">{ status_label }</p>
            {
                if let Some(score) = score {
                    html! { <p class="match-score">{ score }</p> }
                } else {
                    html! {}
                }
            }
            {
                if let Some(matched_at) = &entry.matched_at {
                    html! { <p class="match-date">{ format!("Matched {matched_at}") }</p> }
                } else {
                    html! {}
                }
            }
        </li>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
