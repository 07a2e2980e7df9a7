use yew::prelude::*;

use crate::candidates::{RoommateSummary, SwipeCandidate};

#[derive(Properties, PartialEq)]
pub struct SwipeCardProps {
    pub candidate: SwipeCandidate,
    pub expanded: bool,
    pub on_toggle: Callback<String>,
    /// Dimmed, non-interactive rendering for the card peeking out behind the
    /// active one.
    #[prop_or(false)]
    pub background: bool,
    #[prop_or("Estimated Rent")]
    pub rent_heading: &'static str,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(SwipeCard)]
pub fn swipe_card(props: &SwipeCardProps) -> Html {
    let candidate = &props.candidate;

    let toggle = {
        let on_toggle = props.on_toggle.clone();
        let id = candidate.id.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(id.clone()))
    };

    let classes = classes!(
        "swipe-card",
        props.expanded.then_some("expanded"),
        props.background.then_some("background"),
    );

    let photo = candidate.photos.first().cloned().unwrap_or_default();

    html! {
        <article class={classes}>
            <div class="card-photo">
                <img src={photo} alt={format!("{} photo", candidate.name)} />
            </div>
            <div class="card-body">
                <header>
                    <h2>{ &candidate.name }</h2>
                    {
                        if let Some(city) = &candidate.city {
                            html! { <span class="card-city">{ city }</span> }
                        } else {
                            html! {}
                        }
                    }
                </header>
                {
                    if !props.expanded && !props.children.is_empty() {
                        html! { <div class="card-controls">{ for props.children.iter() }</div> }
                    } else {
                        html! {}
                    }
                }
                <dl class="card-summary">
                    {
                        if let Some(availability) = candidate.availability_label() {
                            html! {
                                <div class="summary-row">
                                    <dt>{ "Available" }</dt>
                                    <dd>{ availability }</dd>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <div class="summary-row">
                        <dt>{ "Area of Study" }</dt>
                        <dd>{ &candidate.field_of_study }</dd>
                    </div>
                    <div class="summary-row">
                        <dt>{ props.rent_heading }</dt>
                        <dd>{ candidate.rent_label() }</dd>
                    </div>
                </dl>
                <button class="expand-toggle" onclick={toggle}>
                    { if props.expanded { "Tap to collapse" } else { "Tap to expand" } }
                </button>
                {
                    if props.expanded {
                        render_detail(candidate)
                    } else {
                        html! {}
                    }
                }
            </div>
        </article>
    }
}

fn render_detail(candidate: &SwipeCandidate) -> Html {
    html! {
        <div class="card-detail">
            <section>
                <h3>{ "About" }</h3>
                <p>{ &candidate.bio }</p>
            </section>
            {
                if candidate.roommates.is_empty() {
                    html! {}
                } else {
                    html! {
                        <section>
                            <h3>{ "Roommates" }</h3>
                            { for candidate.roommates.iter().map(render_roommate) }
                        </section>
                    }
                }
            }
            {
                if candidate.interests.is_empty() {
                    html! {}
                } else {
                    html! {
                        <section>
                            <h3>{ "Interests" }</h3>
                            <ul class="interest-chips">
                                { for candidate.interests.iter().map(|interest| html! {
                                    <li key={interest.clone()}>{ interest }</li>
                                }) }
                            </ul>
                        </section>
                    }
                }
            }
        </div>
    }
}

fn render_roommate(roommate: &RoommateSummary) -> Html {
    let subtitle = [
        roommate.major.as_deref(),
        roommate.pronouns.as_deref(),
        roommate.sleeping_habits.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");

    html! {
        <div class="roommate-mini-card" key={roommate.name.clone()}>
            {
                if let Some(photo) = &roommate.photo {
                    html! { <img src={photo.clone()} alt={roommate.name.clone()} /> }
                } else {
                    html! {}
                }
            }
            <div>
                <p class="roommate-name">{ &roommate.name }</p>
                {
                    if subtitle.is_empty() {
                        html! {}
                    } else {
                        html! { <p class="roommate-subtitle">{ subtitle }</p> }
                    }
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SwipeControlsProps {
    pub on_pass: Callback<()>,
    pub on_undo: Callback<()>,
    pub on_like: Callback<()>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(SwipeControls)]
pub fn swipe_controls(props: &SwipeControlsProps) -> Html {
    let button = |label: &'static str, glyph: &'static str, action: &Callback<()>| {
        let action = action.clone();
        let onclick = Callback::from(move |_: MouseEvent| action.emit(()));
        html! {
            <button
                type="button"
                class="control-button"
                aria-label={label}
                disabled={props.disabled}
                {onclick}
            >
                { glyph }
            </button>
        }
    };

    html! {
        <nav class="swipe-controls">
            { button("Pass", "✕", &props.on_pass) }
            { button("Undo last decision", "↩", &props.on_undo) }
            { button("Like", "✓", &props.on_like) }
        </nav>
    }
}
