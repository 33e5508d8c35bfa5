use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarqueeDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl MarqueeDirection {
    pub fn toggled(self) -> Self {
        match self {
            MarqueeDirection::Horizontal => MarqueeDirection::Vertical,
            MarqueeDirection::Vertical => MarqueeDirection::Horizontal,
        }
    }

    /// BEM modifier for `block` when running vertically, e.g. `marquee--vertical`.
    pub fn modifier(self, block: &str) -> Option<String> {
        match self {
            MarqueeDirection::Horizontal => None,
            MarqueeDirection::Vertical => Some(format!("{}--vertical", block)),
        }
    }

    fn label(self) -> &'static str {
        match self {
            MarqueeDirection::Horizontal => "Scroll vertically",
            MarqueeDirection::Vertical => "Scroll horizontally",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct MarqueeProps {
    pub rows: Vec<Vec<AttrValue>>,
}

#[function_component(MarqueeStrip)]
pub fn marquee_strip(props: &MarqueeProps) -> Html {
    let direction = use_state(MarqueeDirection::default);

    let toggle = {
        let direction = direction.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            direction.set(direction.toggled());
        })
    };

    let group = |items: &Vec<AttrValue>, hidden: bool| {
        html! {
            <ul class="marquee__content" aria-hidden={hidden.to_string()}>
                { for items.iter().map(|item| html! { <li>{ item.clone() }</li> }) }
            </ul>
        }
    };

    html! {
        <div class="marquee-block">
            <button
                id="direction-toggle"
                class={classes!("toggle", direction.modifier("toggle"))}
                onclick={toggle}
            >
                { direction.label() }
            </button>
            <div class={classes!("wrapper", direction.modifier("wrapper"))}>
                { for props.rows.iter().map(|items| html! {
                    <div class={classes!("marquee", direction.modifier("marquee"))}>
                        { group(items, false) }
                        { group(items, true) }
                    </div>
                }) }
            </div>
        </div>
    }
}
