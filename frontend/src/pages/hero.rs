use yew::prelude::*;

use crate::dom::binding::ScrollBinding;
use crate::pages::marquee::MarqueeStrip;

const ICONS: [&str; 5] = ["terminal", "database", "network", "cpu", "shield"];

/// Headline pieces; `Some(n)` drops the placeholder for icon `n` before the segment.
const HEADLINE: [(Option<usize>, &str); 8] = [
    (Some(0), "Shipping tools"),
    (None, "that stay fast"),
    (Some(1), "storing what matters,"),
    (None, "moving packets"),
    (Some(2), "across the wire,"),
    (Some(3), "squeezing every cycle"),
    (None, "and keeping it"),
    (Some(4), "safe by default."),
];

const TECHNOLOGIES: [&[&str]; 2] = [
    &["Rust", "WebAssembly", "Tokio", "Axum", "SQLite", "Yew"],
    &["Linux", "Nix", "Postgres", "Redis", "gRPC", "WebGPU"],
];

#[function_component(HeroPage)]
pub fn hero_page() -> Html {
    // Start at the top so the pinned hero begins at progress 0
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            let binding = web_sys::window().and_then(ScrollBinding::attach);
            move || drop(binding)
        },
        (),
    );

    let marquee_rows: Vec<Vec<AttrValue>> = TECHNOLOGIES
        .iter()
        .map(|row| row.iter().map(|name| AttrValue::from(*name)).collect())
        .collect();

    html! {
        <div class="hero-page">
            <section class="hero-track">
                <section class="hero">
                    <div class="hero-header">
                        <h1>{"Systems, end to end"}</h1>
                        <p>{"Keep scrolling. The icons know where they belong."}</p>
                    </div>

                    <div class="animated-icons">
                        { for ICONS.iter().map(|name| html! {
                            <div class="animated-icon">
                                <img src={format!("/assets/icons/{}.svg", name)} alt={*name} />
                            </div>
                        }) }
                    </div>

                    <h2 class="animated-text">
                        { for HEADLINE.iter().map(|(placeholder, text)| html! {
                            <>
                                if placeholder.is_some() {
                                    <span class="placeholder-icon"></span>
                                }
                                <span class="text-segment">{ *text }{" "}</span>
                            </>
                        }) }
                    </h2>
                </section>
            </section>

            <section class="technologies-section">
                <h2>{"What I build with"}</h2>
                <MarqueeStrip rows={marquee_rows} />
            </section>

            <section class="projects-section">
                <div class="projects-inner">
                    <h2>{"Selected projects"}</h2>
                    <p>{"Storage engines, protocol plumbing and the odd compiler."}</p>
                </div>
            </section>

            <style>
                {r#"
                    body {
                        margin: 0;
                        background: #141414;
                        color: #e3e3db;
                        font-family: "Inter", system-ui, sans-serif;
                    }
                    .hero-track {
                        position: relative;
                        height: 900vh;
                    }
                    .hero {
                        position: sticky;
                        top: 0;
                        width: 100%;
                        height: 100vh;
                        overflow: hidden;
                        background-color: #141414;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                    }
                    .hero-header {
                        position: absolute;
                        top: 50%;
                        left: 50%;
                        transform: translate(-50%, -50%);
                        text-align: center;
                        will-change: transform, opacity;
                    }
                    .animated-icons {
                        position: absolute;
                        bottom: 2rem;
                        left: 50%;
                        margin-left: -350px;
                        width: 700px;
                        display: flex;
                        gap: 1rem;
                        justify-content: center;
                        will-change: transform, opacity;
                    }
                    .animated-icon,
                    .duplicate-icon {
                        flex: 1;
                        aspect-ratio: 1;
                        border-radius: 12px;
                        background: #e3e3db;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        will-change: transform;
                    }
                    .animated-icon img,
                    .duplicate-icon img {
                        width: 60%;
                        height: 60%;
                    }
                    .duplicate-icon {
                        z-index: 10;
                        pointer-events: none;
                        background: #141414;
                    }
                    .animated-text {
                        max-width: 1000px;
                        padding: 0 2rem;
                        text-align: center;
                        font-size: clamp(1.5rem, 4vw, 3.5rem);
                        line-height: 1.4;
                        color: #141414;
                    }
                    .placeholder-icon {
                        display: inline-block;
                        width: 60px;
                        height: 60px;
                        vertical-align: middle;
                        visibility: hidden;
                    }
                    .text-segment {
                        opacity: 0;
                    }
                    .technologies-section,
                    .projects-section {
                        position: relative;
                        min-height: 100vh;
                        overflow: hidden;
                        padding: 4rem 2rem;
                        box-sizing: border-box;
                    }
                    .technologies-section {
                        z-index: 1;
                        background: #1d1d1b;
                    }
                    .projects-section {
                        z-index: 2;
                        background: #e3e3db;
                        color: #141414;
                    }
                    .projects-inner {
                        transform: translateY(-100%);
                    }
                    .toggle {
                        border: 1px solid currentColor;
                        background: none;
                        color: inherit;
                        padding: 0.5rem 1rem;
                        border-radius: 999px;
                        cursor: pointer;
                    }
                    .wrapper {
                        display: flex;
                        flex-direction: column;
                        gap: 1rem;
                        margin-top: 2rem;
                    }
                    .wrapper--vertical {
                        flex-direction: row;
                        height: 60vh;
                    }
                    .marquee {
                        display: flex;
                        overflow: hidden;
                        gap: 2rem;
                    }
                    .marquee--vertical {
                        flex-direction: column;
                    }
                    .marquee__content {
                        display: flex;
                        gap: 2rem;
                        margin: 0;
                        padding: 0;
                        list-style: none;
                        flex-shrink: 0;
                        animation: marquee-x 20s linear infinite;
                    }
                    .marquee--vertical .marquee__content {
                        flex-direction: column;
                        animation-name: marquee-y;
                    }
                    @keyframes marquee-x {
                        to { transform: translateX(calc(-100% - 2rem)); }
                    }
                    @keyframes marquee-y {
                        to { transform: translateY(calc(-100% - 2rem)); }
                    }
                    @media (max-width: 1000px) {
                        .animated-icons {
                            width: 90vw;
                            margin-left: -45vw;
                        }
                        .placeholder-icon {
                            width: 30px;
                            height: 30px;
                        }
                    }
                "#}
            </style>
        </div>
    }
}
