//! Browser front end: builds the page, turns clicks and key presses into
//! [`Command`]s and paints the [`Delta`]s the controller hands back.
//!
//! All game state lives in the thread-local `GAME`; every DOM callback borrows
//! it for exactly one command.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, EventTarget, HtmlButtonElement,
    HtmlCanvasElement, HtmlImageElement, window,
};

use crate::audio::{AudioConfig, AudioError, WebAudio};
use crate::controller::{Command, Delta, Outcome, RoundController};
use crate::render::CanvasRenderer;
use crate::words::WordBank;

/// Page-level tunables.
#[derive(Clone, Debug, PartialEq)]
pub struct WebConfig {
    pub audio: AudioConfig,
    pub win_image: String,
    pub lose_image: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// How long the "enable sound" hint stays up.
    pub advisory_ms: i32,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            win_image: "TIpHat.png".into(),
            lose_image: "wanted.png".into(),
            canvas_width: 160,
            canvas_height: 150,
            advisory_ms: 5_000,
        }
    }
}

const ROOT_ID: &str = "ww-hangman";
const ADVISORY_ID: &str = "ww-sound-prompt";
const SOUND_ID: &str = "sound-toggle";

const STYLE: &str = "\
.hide{display:none !important}\
#ww-hangman{font-family:'Rye','Georgia',serif;color:#3b2310;text-align:center;max-width:760px;margin:0 auto;padding:16px}\
#ww-hangman button{background:#8B4513;color:#FFD700;border:2px solid #FFD700;border-radius:5px;padding:6px 12px;margin:3px;cursor:pointer;font-family:inherit}\
#ww-hangman button:disabled{background:#c9b79c;color:#7a6a55;border-color:#7a6a55;cursor:default}\
#ww-hangman button.active{background:#2E8B57}\
#ww-hangman .letters{width:2.6em}\
#ww-hangman .dashes{font-size:2rem;font-weight:bold;width:30px;text-align:center}\
#ww-hangman canvas{background:#fff;border:3px solid #8B4513;border-radius:6px;margin:12px auto;display:block}\
#ww-hangman .win-msg{color:#2E8B57}\
#ww-hangman .lose-msg{color:#A52A2A}\
#ww-hangman #wanted-image{max-width:220px;margin:0 auto}";

type WebController = RoundController<CanvasRenderer, WebAudio>;

struct WebGame {
    controller: WebController,
    dom: Dom,
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
}

/// Build the page and wire every control. A second call is a no-op.
pub fn start(bank: WordBank, config: WebConfig) -> Result<(), JsValue> {
    if GAME.with(|g| g.borrow().is_some()) {
        log::warn!("game already started");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    ensure_style(&doc)?;
    let categories: Vec<String> = bank.categories().map(str::to_string).collect();
    let dom = Dom::build(&doc, &config, &categories)?;

    let ctx: CanvasRenderingContext2d = dom
        .canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    let renderer = CanvasRenderer::new(dom.canvas.clone(), ctx);

    let prompt_doc = doc.clone();
    let advisory_ms = config.advisory_ms;
    let audio = WebAudio::new(config.audio.clone(), move |err| {
        show_advisory(&prompt_doc, &err, advisory_ms)
    });

    let controller = RoundController::new(bank, renderer, audio);
    GAME.with(|g| g.replace(Some(WebGame { controller, dom })));
    wire_document(&doc)?;
    log::info!("Wild West Hangman ready ({} categories)", categories.len());
    Ok(())
}

fn dispatch(command: Command) {
    GAME.with(|cell| {
        let mut guard = cell.borrow_mut();
        let Some(game) = guard.as_mut() else {
            return;
        };
        match game.controller.handle(command) {
            Ok(deltas) => game.dom.apply(&deltas),
            Err(err) => log::error!("{err}"),
        }
    });
}

/// First user gesture: load audio and show the mute button.
fn unlock_audio() {
    GAME.with(|cell| {
        if let Some(game) = cell.borrow_mut().as_mut() {
            if game.controller.audio_mut().unlock() {
                if let Err(err) = game.dom.ensure_sound_toggle() {
                    log::warn!("could not add sound toggle: {err:?}");
                }
            }
        }
    });
}

fn wire_document(doc: &Document) -> Result<(), JsValue> {
    on_click(doc, unlock_audio)?;

    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if evt.ctrl_key() || evt.meta_key() || evt.alt_key() {
            return;
        }
        if let Some(command) = Command::from_key(&evt.key()) {
            dispatch(command);
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_click(target: &EventTarget, mut f: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| f()) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn ensure_style(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("ww-style").is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id("ww-style");
    style.set_text_content(Some(STYLE));
    if let Some(head) = doc.head() {
        head.append_child(&style)?;
    } else if let Some(body) = doc.body() {
        body.append_child(&style)?;
    }
    Ok(())
}

fn element(doc: &Document, tag: &str, id: &str, text: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !id.is_empty() {
        el.set_id(id);
    }
    if !text.is_empty() {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

fn button(doc: &Document, id: &str, text: &str) -> Result<HtmlButtonElement, JsValue> {
    Ok(element(doc, "button", id, text)?.dyn_into()?)
}

fn show(el: &Element) {
    el.class_list().remove_1("hide").ok();
}

fn hide(el: &Element) {
    el.class_list().add_1("hide").ok();
}

fn show_advisory(doc: &Document, err: &AudioError, ms: i32) {
    log::info!("showing sound hint after: {err}");
    if doc.get_element_by_id(ADVISORY_ID).is_some() {
        return;
    }
    let Some(body) = doc.body() else {
        return;
    };
    let Ok(prompt) = element(doc, "div", ADVISORY_ID, "Click the 🔊 button in the corner to enable music!")
    else {
        return;
    };
    prompt.set_attribute("style", "position:fixed; top:50px; right:10px; z-index:1001; color:#FFD700; padding:10px; background:rgba(0,0,0,0.7); border-radius:5px;").ok();
    if body.append_child(&prompt).is_err() {
        return;
    }
    let cleanup = Closure::once_into_js(move || prompt.remove());
    if let Some(win) = window() {
        win.set_timeout_with_callback_and_timeout_and_arguments_0(cleanup.unchecked_ref(), ms)
            .ok();
    }
}

/// Handles on every element the game updates.
struct Dom {
    doc: Document,
    intro: Element,
    game: Element,
    category_buttons: Vec<(String, HtmlButtonElement)>,
    letter_container: Element,
    letter_buttons: Vec<HtmlButtonElement>,
    word_section: Element,
    slots: Vec<Element>,
    canvas: HtmlCanvasElement,
    new_game: Element,
    image: HtmlImageElement,
    message: Element,
    word_line: Element,
    sound_toggle: Option<HtmlButtonElement>,
    win_image: String,
    lose_image: String,
}

impl Dom {
    fn build(doc: &Document, config: &WebConfig, categories: &[String]) -> Result<Dom, JsValue> {
        let body = doc
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        // Reuse the root if the host page provides one.
        let root = match doc.get_element_by_id(ROOT_ID) {
            Some(el) => {
                el.set_inner_html("");
                el
            }
            None => {
                let el = element(doc, "div", ROOT_ID, "")?;
                body.append_child(&el)?;
                el
            }
        };

        // --- Intro & instructions -------------------------------------------
        let intro = element(doc, "div", "intro-screen", "")?;
        let title = element(doc, "h1", "", "Wild West Hangman")?;
        intro.append_child(&title)?;
        let start_btn = button(doc, "start-game-button", "Start Game")?;
        let how_btn = button(doc, "how-to-play-button", "How To Play")?;
        intro.append_child(&start_btn)?;
        intro.append_child(&how_btn)?;
        root.append_child(&intro)?;

        let how_to = element(doc, "div", "how-to-play-screen", "")?;
        hide(&how_to);
        let how_title = element(doc, "h2", "", "How To Play")?;
        let rules = element(
            doc,
            "p",
            "",
            "Pick your posse, then guess the hidden word one letter at a time with the buttons or your keyboard. Every wrong guess puts another piece of the outlaw on the gallows. Six misses and he gets away!",
        )?;
        how_to.append_child(&how_title)?;
        how_to.append_child(&rules)?;
        let close_btn = button(doc, "close-instructions", "Close")?;
        how_to.append_child(&close_btn)?;
        root.append_child(&how_to)?;

        // --- Game screen ----------------------------------------------------
        let game = element(doc, "div", "game-content", "")?;
        hide(&game);

        let options = element(doc, "div", "options-container", "")?;
        let options_title = element(doc, "h3", "", "Choose Your Posse:")?;
        options.append_child(&options_title)?;
        let option_row = element(doc, "div", "", "")?;
        let mut category_buttons = Vec::with_capacity(categories.len());
        for name in categories {
            let btn = button(doc, "", name)?;
            btn.set_class_name("options");
            let pick = name.clone();
            on_click(&btn, move || dispatch(Command::SelectCategory(pick.clone())))?;
            option_row.append_child(&btn)?;
            category_buttons.push((name.clone(), btn));
        }
        options.append_child(&option_row)?;
        game.append_child(&options)?;

        let letter_container = element(doc, "div", "letter-container", "")?;
        hide(&letter_container);
        let mut letter_buttons = Vec::with_capacity(26);
        for c in 'A'..='Z' {
            let btn = button(doc, "", &c.to_string())?;
            btn.set_class_name("letters");
            on_click(&btn, move || dispatch(Command::GuessLetter(c)))?;
            letter_container.append_child(&btn)?;
            letter_buttons.push(btn);
        }
        game.append_child(&letter_container)?;

        let word_section = element(doc, "div", "user-input-section", "")?;
        word_section
            .set_attribute("style", "display:flex; justify-content:center; gap:10px; margin-top:20px;")
            .ok();
        game.append_child(&word_section)?;

        let canvas: HtmlCanvasElement = element(doc, "canvas", "canvas", "")?.dyn_into()?;
        canvas.set_width(config.canvas_width);
        canvas.set_height(config.canvas_height);
        game.append_child(&canvas)?;

        let new_game = element(doc, "div", "new-game-container", "")?;
        hide(&new_game);
        let result = element(doc, "div", "result-text", "")?;
        let image: HtmlImageElement = element(doc, "img", "wanted-image", "")?.dyn_into()?;
        hide(&image);
        let message = element(doc, "h2", "", "")?;
        let word_line = element(doc, "p", "", "")?;
        result.append_child(&image)?;
        result.append_child(&message)?;
        result.append_child(&word_line)?;
        new_game.append_child(&result)?;
        let new_game_btn = button(doc, "new-game-button", "New Game")?;
        new_game.append_child(&new_game_btn)?;
        game.append_child(&new_game)?;

        let menu_btn = button(doc, "return-to-menu-button", "Return to Menu")?;
        game.append_child(&menu_btn)?;
        root.append_child(&game)?;

        // --- Navigation -----------------------------------------------------
        {
            let (intro, game) = (intro.clone(), game.clone());
            on_click(&start_btn, move || {
                unlock_audio();
                hide(&intro);
                show(&game);
                dispatch(Command::StartNewRound);
            })?;
        }
        {
            let (intro, how_to) = (intro.clone(), how_to.clone());
            on_click(&how_btn, move || {
                hide(&intro);
                show(&how_to);
            })?;
        }
        {
            let (intro, how_to) = (intro.clone(), how_to.clone());
            on_click(&close_btn, move || {
                hide(&how_to);
                show(&intro);
            })?;
        }
        on_click(&new_game_btn, || dispatch(Command::StartNewRound))?;
        on_click(&menu_btn, || dispatch(Command::ReturnToMenu))?;

        Ok(Dom {
            doc: doc.clone(),
            intro,
            game,
            category_buttons,
            letter_container,
            letter_buttons,
            word_section,
            slots: Vec::new(),
            canvas,
            new_game,
            image,
            message,
            word_line,
            sound_toggle: None,
            win_image: config.win_image.clone(),
            lose_image: config.lose_image.clone(),
        })
    }

    fn ensure_sound_toggle(&mut self) -> Result<(), JsValue> {
        if self.sound_toggle.is_some() {
            return Ok(());
        }
        let body = self
            .doc
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        let btn = button(&self.doc, SOUND_ID, "🔊")?;
        btn.set_attribute("style", "position:fixed; top:10px; right:10px; z-index:1000; padding:5px 10px; background:#8B4513; border:2px solid #FFD700; border-radius:5px; cursor:pointer;").ok();
        on_click(&btn, || dispatch(Command::ToggleMute))?;
        body.append_child(&btn)?;
        self.sound_toggle = Some(btn);
        Ok(())
    }

    fn apply(&mut self, deltas: &[Delta]) {
        for delta in deltas {
            if let Err(err) = self.apply_one(delta) {
                log::warn!("failed to apply {delta:?}: {err:?}");
            }
        }
    }

    fn apply_one(&mut self, delta: &Delta) -> Result<(), JsValue> {
        match delta {
            Delta::BoardReset { categories } => {
                for (name, btn) in &self.category_buttons {
                    btn.set_disabled(!categories.contains(name));
                    btn.class_list().remove_1("active").ok();
                }
                for btn in &self.letter_buttons {
                    btn.set_disabled(false);
                }
                hide(&self.letter_container);
                hide(&self.new_game);
                hide(&self.image);
                show(&self.canvas);
                self.word_section.set_inner_html("");
                self.slots.clear();
                self.message.set_text_content(None);
                self.word_line.set_text_content(None);
            }
            Delta::CategoryLocked { active } => {
                for (name, btn) in &self.category_buttons {
                    if name == active {
                        btn.class_list().add_1("active").ok();
                    }
                    btn.set_disabled(true);
                }
            }
            Delta::LettersEnabled => {
                for btn in &self.letter_buttons {
                    btn.set_disabled(false);
                }
                show(&self.letter_container);
            }
            Delta::WordMasked { slots } => {
                self.word_section.set_inner_html("");
                self.slots.clear();
                for slot in slots {
                    let span = element(&self.doc, "span", "", "")?;
                    span.set_class_name("dashes");
                    span.set_text_content(Some(match slot {
                        Some(' ') => "\u{00a0}",
                        Some(_) | None => "_",
                    }));
                    self.word_section.append_child(&span)?;
                    self.slots.push(span);
                }
            }
            Delta::LetterDisabled(letter) => {
                if let Some(btn) = self.letter_buttons.get(letter.index()) {
                    btn.set_disabled(true);
                }
            }
            Delta::Revealed { letter, positions } => {
                let text = letter.to_string();
                for &i in positions {
                    if let Some(span) = self.slots.get(i) {
                        span.set_text_content(Some(&text));
                    }
                }
            }
            Delta::StageDrawn(stage) => log::debug!("drew stage {}", stage.ordinal()),
            Delta::RoundOver { outcome, word } => self.show_result(*outcome, word)?,
            Delta::ReturnedToMenu => {
                hide(&self.game);
                show(&self.intro);
            }
            Delta::SoundToggled { muted } => self.set_sound_icon(*muted),
        }
        Ok(())
    }

    fn show_result(&self, outcome: Outcome, word: &str) -> Result<(), JsValue> {
        for (_, btn) in &self.category_buttons {
            btn.set_disabled(true);
        }
        for btn in &self.letter_buttons {
            btn.set_disabled(true);
        }
        let (src, alt, class, text) = match outcome {
            Outcome::Won => (
                &self.win_image,
                "Cowboy tipping his hat",
                "win-msg",
                "YEEHAW! You caught the outlaw!",
            ),
            Outcome::Lost => (
                &self.lose_image,
                "Wanted poster",
                "lose-msg",
                "Aw Man! You let em get away!",
            ),
        };
        hide(&self.canvas);
        self.image.set_src(src);
        self.image.set_alt(alt);
        show(&self.image);
        self.message.set_class_name(class);
        self.message.set_text_content(Some(text));

        self.word_line.set_text_content(Some("The word was "));
        let span = element(&self.doc, "span", "", word)?;
        self.word_line.append_child(&span)?;
        show(&self.new_game);
        Ok(())
    }

    fn set_sound_icon(&self, muted: bool) {
        if let Some(btn) = &self.sound_toggle {
            btn.set_text_content(Some(if muted { "🔇" } else { "🔊" }));
        }
    }
}
