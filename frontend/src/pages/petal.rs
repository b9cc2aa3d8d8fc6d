use crate::components::frame_scroll::ScrollFrameAnimation;
use crate::config;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq)]
enum PetalTab {
    Brief,
    Resources,
    Kits,
    ShowReady,
}

impl PetalTab {
    const ALL: [PetalTab; 4] = [
        PetalTab::Brief,
        PetalTab::Resources,
        PetalTab::Kits,
        PetalTab::ShowReady,
    ];

    fn label(self) -> &'static str {
        match self {
            PetalTab::Brief => "Brief",
            PetalTab::Resources => "Resources",
            PetalTab::Kits => "Kits",
            PetalTab::ShowReady => "Show-ready",
        }
    }
}

#[function_component(PetalPage)]
pub fn petal_page() -> Html {
    let active_tab = use_state(|| PetalTab::Brief);

    let page_css = r#"
        body {
            margin: 0;
            background: black;
            font-family: system-ui, sans-serif;
        }
        .petal-header {
            margin-top: 1rem;
            display: flex;
            flex-direction: row;
            align-items: center;
            padding-left: 0.5rem;
        }
        .petal-wordmark {
            margin: 0 0 0 0.5rem;
            font-size: 6rem;
            font-weight: bold;
            color: transparent;
            -webkit-text-stroke: 1px white;
        }
        .petal-main {
            background: #1a1a2e;
        }
        .petal-tabs {
            display: flex;
            gap: 0.5rem;
            margin-top: 0.5rem;
            padding: 0;
        }
        .petal-tab {
            padding: 0.5rem 1.5rem;
            border: none;
            border-radius: 0;
            background: transparent;
            color: white;
            cursor: pointer;
            transition: color 0.2s;
        }
        .petal-tab:hover {
            color: rgba(255, 255, 255, 0.9);
        }
        .petal-tab.active {
            background: white;
            color: black;
        }
        .petal-tab-content {
            margin-top: 1.5rem;
        }
        .petal-brief-copy {
            display: flex;
            flex-direction: row;
            gap: 1rem;
            color: white;
        }
        .petal-brief-title {
            font-size: 2.25rem;
            font-weight: bold;
        }
        .petal-brief-body {
            font-size: 1.25rem;
        }
        @media (max-width: 768px) {
            .petal-wordmark {
                font-size: 3.5rem;
            }
            .petal-brief-copy {
                flex-direction: column;
            }
        }
    "#;

    let tab_button = |tab: PetalTab| {
        let active_tab = active_tab.clone();
        let is_active = *active_tab == tab;
        html! {
            <button
                class={classes!("petal-tab", is_active.then(|| "active"))}
                onclick={Callback::from(move |_| active_tab.set(tab))}
            >
                {tab.label()}
            </button>
        }
    };

    let content = match *active_tab {
        PetalTab::Brief => html! {
            <div>
                <img src={config::DIAGRAM_SRC} alt="PETAL diagram" width="1000" height="1000" />
                <div class="petal-brief-copy">
                    <p class="petal-brief-title">{"Designed"}<br/>{"with"}<br/>{"Intention"}</p>
                    <p class="petal-brief-body">
                        {"The PETAL modular lighting system is designed with a strict commitment to accessibility and compatibility. "}
                        {"Every component of the system can be fabricated completely from scratch with the CAD files available for free on our website. "}
                        {"Running on versatile, industry standard W-LED, Art-NET, and sACN data protocols, the PETAL system can be integrated into almost any existing lighting rig and applied to nearly any creative project."}
                    </p>
                </div>
                <ScrollFrameAnimation total_frames={config::BRIEF_TOTAL_FRAMES} />
            </div>
        },
        PetalTab::Resources | PetalTab::Kits | PetalTab::ShowReady => html! {},
    };

    html! {
        <div>
            <style>{page_css}</style>
            <header class="petal-header">
                <img src={config::LOGO_SRC} alt="PETAL logo" width="100" height="100" />
                <h1 class="petal-wordmark">{"PETAL"}</h1>
            </header>
            <main>
                <div class="petal-main">
                    <nav class="petal-tabs">
                        { for PetalTab::ALL.iter().map(|tab| tab_button(*tab)) }
                    </nav>
                    <div class="petal-tab-content">
                        {content}
                    </div>
                </div>
            </main>
        </div>
    }
}
