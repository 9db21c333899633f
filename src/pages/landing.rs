use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::components::Link;

use crate::effects::EffectRegistry;
use crate::Route;

struct Track {
    name: &'static str,
    level: u32,
}

const TRACKS: [Track; 4] = [
    Track { name: "Lead Vox", level: 72 },
    Track { name: "Kick", level: 86 },
    Track { name: "Bass", level: 64 },
    Track { name: "Pad", level: 48 },
];

struct Feature {
    title: &'static str,
    body: &'static str,
    icon_class: &'static str,
}

const FEATURES: [Feature; 6] = [
    Feature {
        title: "Hears what you hear",
        body: "Real-time spectral analysis flags masking, mud and harshness before your ears get tired.",
        icon_class: "f-icon f-icon-spectrum",
    },
    Feature {
        title: "Explains every move",
        body: "Each suggestion comes with the why: the frequency, the conflict and the fix.",
        icon_class: "f-icon f-icon-chat",
    },
    Feature {
        title: "Learns your taste",
        body: "Accept or reject a move and your style profile updates. Next session starts closer.",
        icon_class: "f-icon f-icon-memory",
    },
    Feature {
        title: "Stays in your DAW",
        body: "Runs as a plugin on the master bus. No bouncing, no uploading, no waiting.",
        icon_class: "f-icon f-icon-plugin",
    },
    Feature {
        title: "Genre aware",
        body: "Cross-references your profile with genre models so a trap mix never sounds like folk.",
        icon_class: "f-icon f-icon-genre",
    },
    Feature {
        title: "Undo anything",
        body: "Every change is a regular plugin move on your tracks. Bypass it and you are back.",
        icon_class: "f-icon f-icon-undo",
    },
];

struct Step {
    phase: &'static str,
    title: &'static str,
    body: &'static str,
}

const STEPS: [Step; 4] = [
    Step { phase: "Now", title: "Private beta", body: "Mix assistant for vocals, drums and bass." },
    Step { phase: "Q2", title: "Style memory", body: "Profiles that follow you across sessions." },
    Step { phase: "Q3", title: "Stem mastering", body: "Loudness and tone matched to your references." },
    Step { phase: "Q4", title: "Collab rooms", body: "Share a profile with your engineer." },
];

struct Plan {
    name: &'static str,
    price: &'static str,
    perks: &'static [&'static str],
    featured: bool,
}

const PLANS: [Plan; 3] = [
    Plan {
        name: "Bedroom",
        price: "Free",
        perks: &["3 sessions a month", "Mix suggestions", "Basic style memory"],
        featured: false,
    },
    Plan {
        name: "Studio",
        price: "$12/mo",
        perks: &["Unlimited sessions", "Full style memory", "Genre models", "Priority updates"],
        featured: true,
    },
    Plan {
        name: "Label",
        price: "$49/mo",
        perks: &["5 seats", "Shared profiles", "Stem mastering"],
        featured: false,
    },
];

const PAGE_STYLE: &str = r#"
    .landing-page { --accent: #e8a44a; --warm: #f06a3c; background: #0d0c0b; color: #eee; }
    .nav { position: fixed; top: 0; left: 0; right: 0; z-index: 10; display: flex;
           justify-content: space-between; align-items: center; padding: 1rem 2rem;
           transition: background 0.3s ease; }
    .nav.scrolled { background: rgba(13, 12, 11, 0.92); backdrop-filter: blur(10px); }
    .nav-toggle { display: none; }
    @media (max-width: 900px) {
        .nav-toggle { display: block; }
        .nav-links { display: none; }
        .nav-links.open { display: flex; flex-direction: column; }
    }
    .hero { position: relative; min-height: 100vh; }
    #waveform-bg { position: absolute; inset: 0; width: 100%; height: 100%; pointer-events: none; }
    #hero-mockup { perspective: 1200px; }
    #mockup { transform: rotateY(-3deg) rotateX(1deg); transition: transform 0.2s ease-out; }
    .m-track { position: relative; transition: opacity 0.3s ease; }
    .m-playhead { position: absolute; top: 0; bottom: 0; width: 2px; background: var(--accent); }
    .m-meter-fill { height: var(--lvl); transition: height 0.3s ease; }
    .m-solo.active { background: var(--accent); color: #000; }
    #mock-spectrum { display: flex; align-items: flex-end; gap: 2px; height: 60px; }
    .ms-bar { flex: 1; height: var(--h); background: var(--accent); transition: height 0.12s linear; }
    .transport-bar { height: 3px; background: var(--accent); }
    .transport-dim { opacity: 0.5; }
    .ai-cursor { animation: blink 1s steps(1) infinite; }
    @keyframes blink { 50% { opacity: 0; } }
    .f-icon-spectrum { display: flex; align-items: flex-end; gap: 2px; height: 40px; }
    .mp-fill { width: var(--w); transition: width 1.2s cubic-bezier(0.16, 1, 0.3, 1); }
    .timeline-rail { height: 2px; background: #333; }
    #timeline-progress { height: 100%; width: 0; background: var(--accent); transition: width 0.6s ease; }
    .tl-step.active .tl-dot { background: var(--accent); }
    .animate-on-scroll { opacity: 0; transform: translateY(24px);
                         transition: opacity 0.7s ease, transform 0.7s ease; }
    .animate-on-scroll.visible { opacity: 1; transform: none; }
    .stagger > .animate-on-scroll:nth-child(2) { transition-delay: 0.08s; }
    .stagger > .animate-on-scroll:nth-child(3) { transition-delay: 0.16s; }
    .stagger > .animate-on-scroll:nth-child(4) { transition-delay: 0.24s; }
    .stagger > .animate-on-scroll:nth-child(5) { transition-delay: 0.32s; }
    .stagger > .animate-on-scroll:nth-child(6) { transition-delay: 0.4s; }
    .scroll-cue { position: absolute; bottom: 2rem; left: 50%; transform: translateX(-50%); }
"#;

fn mockup() -> Html {
    html! {
        <div id="hero-mockup" class="hero-product">
            <div id="mockup" class="mockup">
                <div class="m-tracks">
                    { for TRACKS.iter().map(|track| html! {
                        <div class="m-track">
                            <span class="m-track-name">{ track.name }</span>
                            <button class="m-solo" type="button">{"S"}</button>
                            <div class="m-lane">
                                <div class="m-playhead"></div>
                            </div>
                            <div class="m-meter">
                                <div class="m-meter-fill" style={format!("--lvl: {}%", track.level)}></div>
                            </div>
                        </div>
                    }) }
                </div>
                <div id="mock-spectrum" class="m-spectrum"></div>
                <div class="m-ai">
                    <span class="m-ai-label">{"Soundboy"}</span>
                    <p><span id="ai-msg"></span><span class="ai-cursor">{"▍"}</span></p>
                </div>
                <div class="transport">
                    <button id="transport-play" type="button" class="transport-play">{"▶"}</button>
                    <div class="transport-track"><div class="transport-bar"></div></div>
                    <span class="transport-time">
                        {"0:00 "}<span class="transport-dim">{"/ 3:42"}</span>
                    </span>
                </div>
            </div>
        </div>
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    // Effects drive the markup below directly, so they start after the
    // first render and stop when the route changes.
    use_effect_once(|| {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
        let mut effects = EffectRegistry::landing();
        effects.start_all();
        move || effects.stop_all()
    });

    html! {
        <div class="landing-page">
            <style>{ PAGE_STYLE }</style>
            <nav class="nav">
                <a href="#top" class="nav-logo">{"SOUNDBOY.AI"}</a>
                <button class="nav-toggle" type="button" aria-expanded="false" aria-label="Menu">
                    {"☰"}
                </button>
                <div class="nav-links">
                    <a href="#features">{"Features"}</a>
                    <a href="#memory">{"Memory"}</a>
                    <a href="#roadmap">{"Roadmap"}</a>
                    <a href="#pricing">{"Pricing"}</a>
                    <a href="#join" class="nav-cta">{"Join the Beta"}</a>
                </div>
            </nav>

            <header id="top" class="hero">
                <canvas id="waveform-bg"></canvas>
                <div class="hero-content">
                    <h1>{"Your mix engineer that remembers."}</h1>
                    <p class="hero-subtitle">
                        {"Soundboy listens to your session, explains what's fighting, and learns how you like things to sound."}
                    </p>
                    <a href="#join" class="hero-cta">{"Join the Beta — It's Free →"}</a>
                    <div class="hero-proof">
                        <div><strong data-target="1200">{"0"}</strong><span>{"producers waiting"}</span></div>
                        <div><strong data-target="48000">{"0"}</strong><span>{"mix moves analyzed"}</span></div>
                        <div><strong data-target="47">{"0"}</strong><span>{"avg sessions per profile"}</span></div>
                    </div>
                </div>
                { mockup() }
                <div class="scroll-cue">{"↓"}</div>
            </header>

            <section id="features" class="features">
                <div class="section-header">
                    <h2>{"Built for the way you actually mix"}</h2>
                </div>
                <div class="feature-grid">
                    { for FEATURES.iter().map(|feature| html! {
                        <div class="f-card">
                            <div class={feature.icon_class}></div>
                            <h3>{ feature.title }</h3>
                            <p>{ feature.body }</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="demo">
                <div class="section-header">
                    <h2>{"Hear the difference"}</h2>
                </div>
                <div class="demo-player">
                    <div class="demo-cards">
                        <div class="demo-before">{"Before"}</div>
                        <div class="demo-after">{"After"}</div>
                    </div>
                    <input id="demo-slider" type="range" min="0" max="100" value="50" />
                    <span id="demo-pct">{"50%"}</span>
                </div>
            </section>

            <section id="memory" class="memory">
                <div class="section-header">
                    <h2>{"Memory that compounds"}</h2>
                </div>
                <div class="memory-arch">
                    <div class="mem-tier"><h4>{"Session"}</h4><p>{"What's happening in this mix right now."}</p></div>
                    <div class="mem-tier"><h4>{"Project"}</h4><p>{"Decisions you made on this record."}</p></div>
                    <div class="mem-tier"><h4>{"Style"}</h4><p>{"How you like things to sound, everywhere."}</p></div>
                </div>
                <div class="memory-compound">
                    <div class="mem-profile">
                        <div class="mp-row"><span>{"Warm vocals"}</span><div class="mp-bar"><div class="mp-fill" style="--w: 82%"></div></div></div>
                        <div class="mp-row"><span>{"Tight low end"}</span><div class="mp-bar"><div class="mp-fill" style="--w: 74%"></div></div></div>
                        <div class="mp-row"><span>{"Wide pads"}</span><div class="mp-bar"><div class="mp-fill" style="--w: 61%"></div></div></div>
                        <div class="mp-row"><span>{"Short reverbs"}</span><div class="mp-bar"><div class="mp-fill" style="--w: 45%"></div></div></div>
                    </div>
                </div>
            </section>

            <section id="roadmap" class="roadmap">
                <div class="section-header">
                    <h2>{"Where we're going"}</h2>
                </div>
                <div class="timeline-rail"><div id="timeline-progress"></div></div>
                <div class="timeline">
                    { for STEPS.iter().map(|step| html! {
                        <div class="tl-step">
                            <span class="tl-dot"></span>
                            <span class="tl-phase">{ step.phase }</span>
                            <h4>{ step.title }</h4>
                            <p>{ step.body }</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="pricing" class="pricing">
                <div class="section-header">
                    <h2>{"Pricing"}</h2>
                </div>
                <div class="pricing-grid">
                    { for PLANS.iter().map(|plan| html! {
                        <div class={classes!("price-card", plan.featured.then(|| "featured"))}>
                            <h3>{ plan.name }</h3>
                            <div class="price">{ plan.price }</div>
                            <ul>
                                { for plan.perks.iter().map(|perk| html! { <li>{ *perk }</li> }) }
                            </ul>
                        </div>
                    }) }
                </div>
            </section>

            <section class="vision">
                <div class="vision-inner">
                    <h2>{"Tools that learn you back."}</h2>
                    <p>{"Every producer has a sound. Soundboy's job is to get you there faster, not to replace your ears."}</p>
                </div>
            </section>

            <section id="join" class="cta">
                <div class="cta-inner">
                    <h2>{"Get in early"}</h2>
                    <form id="signup-form">
                        <input type="email" name="email" placeholder="you@studio.com" required={true} />
                        <input type="text" name="daw" placeholder="Your DAW" />
                        <button type="submit"><span>{"Join the Beta — It's Free →"}</span></button>
                    </form>
                </div>
            </section>

            <footer class="footer">
                <Link<Route> to={Route::Home} classes="footer-logo">{"SOUNDBOY.AI"}</Link<Route>>
            </footer>
        </div>
    }
}
