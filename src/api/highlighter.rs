//! `PawHighlighter`: the content script's handle on the engine
//!
//! One instance per page. It owns the highlight session, the live DOM
//! adapter and the bubble hover state; the JS side forwards events and
//! renders the bubble from the commands it receives.

use super::helpers::{deserialize, deserialize_or_default, serialize, to_js_error};
use super::intl::IntlSegmenter;
use super::net;
use crate::capture::{parse_protocols, select_protocol, word_selection, CapturePayload, CaptureSettings, PageContext};
use crate::config::HighlightConfig;
use crate::dom::WebDom;
use crate::error::HighlightError;
use crate::highlight::{
    classify_hover, unwrap_clickable_words, wrap_clickable_words, BubbleCommand, BubbleContent,
    HighlightReport, HighlightSession, HoverTarget, HoverTracker, TimerRequest,
};
use crate::parse::Tokenizer;
use crate::utils::{UnicodeWordSegmenter, WordSegmenter};
use crate::{wasm_error, wasm_info, wasm_warn};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::Node;

/// What the JS side should do with the bubble
#[derive(Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum BubbleAction {
    Show { content: BubbleContent },
    Hide,
}

/// Reply of `POST /paw` as the server sends it
#[derive(serde::Deserialize, Default)]
struct CaptureReply {
    #[serde(default)]
    status: String,
}

struct Inner {
    session: HighlightSession,
    dom: WebDom,
    hover: HoverTracker<Node>,
    config: HighlightConfig,
}

impl Inner {
    fn root(&self) -> Result<Node, HighlightError> {
        self.dom.body()
    }

    fn classify(&self, node: Option<Node>) -> HoverTarget<Node> {
        classify_hover(&self.dom, node.as_ref(), self.session.is_active())
    }

    fn command(&self, command: BubbleCommand<Node>) -> Option<BubbleAction> {
        match command {
            BubbleCommand::Show(marker) => self
                .session
                .info_for_marker(&self.dom, &marker)
                .map(|info| BubbleAction::Show {
                    content: BubbleContent::from(info),
                }),
            BubbleCommand::Hide => Some(BubbleAction::Hide),
            BubbleCommand::Nothing => None,
        }
    }
}

/// Fetch the word list and install it; shared by `refresh` and captures
async fn sync_words(inner: Rc<RefCell<Inner>>) -> Result<HighlightReport, HighlightError> {
    let (ticket, config) = {
        let mut guard = inner.borrow_mut();
        (guard.session.begin_sync(), guard.config.clone())
    };
    let response = net::fetch_words(&config).await;

    let mut guard = inner.borrow_mut();
    let Inner { session, dom, .. } = &mut *guard;
    let root = dom.body()?;
    session.complete_sync(dom, &root, ticket, response)
}

fn page_source() -> Option<String> {
    web_sys::window()?
        .document()?
        .document_element()
        .map(|root| root.outer_html())
}

fn clear_selection() {
    let selection = web_sys::window().and_then(|w| w.get_selection().ok().flatten());
    if let Some(selection) = selection {
        if let Err(e) = selection.remove_all_ranges() {
            wasm_warn!("Could not clear the selection: {:?}", e);
        }
    }
}

#[wasm_bindgen]
pub struct PawHighlighter {
    inner: Rc<RefCell<Inner>>,
}

fn cjk_segmenter() -> Box<dyn WordSegmenter> {
    match IntlSegmenter::new("ja-JP") {
        Ok(segmenter) => Box::new(segmenter),
        Err(e) => {
            wasm_warn!("Intl.Segmenter unavailable ({:?}), using UAX #29", e);
            Box::new(UnicodeWordSegmenter)
        }
    }
}

#[wasm_bindgen]
impl PawHighlighter {
    /// Create a highlighter for the current page
    ///
    /// `config` is a partial `HighlightConfig` object; missing fields use
    /// their defaults and `hostname` defaults to `location.hostname`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PawHighlighter, JsValue> {
        let mut config: HighlightConfig = deserialize_or_default(config, "Invalid highlighter config")?;
        if config.hostname.is_empty() {
            config.hostname = web_sys::window()
                .and_then(|w| w.location().hostname().ok())
                .unwrap_or_default();
        }

        let dom = WebDom::from_window().map_err(to_js_error)?;
        let tokenizer = Tokenizer::with_segmenter(&config, cjk_segmenter());
        let inner = Inner {
            session: HighlightSession::with_tokenizer(config.clone(), tokenizer),
            dom,
            hover: HoverTracker::new(config.hover_delay_ms),
            config,
        };
        wasm_info!("PawHighlighter created for '{}'", inner.config.hostname);

        Ok(PawHighlighter {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    /// Whether auto highlight is currently on
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.borrow().session.is_active()
    }

    /// Fetch the word list and highlight the page
    ///
    /// Resolves to the highlight report. Several refreshes may be in flight;
    /// whichever response arrives last is installed.
    pub fn refresh(&self) -> js_sys::Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let report = sync_words(inner).await.map_err(to_js_error)?;
            serialize(&report, "Failed to serialize highlight report")
        })
    }

    /// Install an already fetched `GET /words` body and highlight the page
    #[wasm_bindgen(js_name = enableWith)]
    pub fn enable_with(&self, words_json: &str) -> Result<JsValue, JsValue> {
        let mut guard = self.inner.borrow_mut();
        let Inner { session, dom, .. } = &mut *guard;
        let root = dom.body().map_err(to_js_error)?;
        let ticket = session.begin_sync();
        let report = session
            .complete_sync(dom, &root, ticket, Ok(words_json.to_string()))
            .map_err(to_js_error)?;
        serialize(&report, "Failed to serialize highlight report")
    }

    /// Grey out every marker; returns how many were touched
    pub fn disable(&self) -> Result<usize, JsValue> {
        let mut guard = self.inner.borrow_mut();
        let Inner { session, dom, .. } = &mut *guard;
        let root = dom.body().map_err(to_js_error)?;
        session.disable(dom, &root).map_err(to_js_error)
    }

    /// Delete a word on the server, then unwrap its markers
    ///
    /// On network failure the markers stay as they are.
    #[wasm_bindgen(js_name = deleteWord)]
    pub fn delete_word(&self, word: String) -> js_sys::Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let config = inner.borrow().config.clone();
            let reply = match net::delete_word(&config, &word).await {
                Ok(reply) => reply,
                Err(e) => {
                    wasm_error!("Deleting '{}' failed: {}", word, e);
                    return Err(to_js_error(e));
                }
            };

            let mut guard = inner.borrow_mut();
            let Inner { session, dom, .. } = &mut *guard;
            let root = dom.body().map_err(to_js_error)?;
            let unwrapped = session.delete_word(dom, &root, &word).map_err(to_js_error)?;
            wasm_info!("Deleted '{}' ({} markers), server said: {}", word, unwrapped, reply);
            Ok(JsValue::from_str(&reply))
        })
    }

    /// Bubble content for a marker element, or `undefined`
    #[wasm_bindgen(js_name = bubbleContent)]
    pub fn bubble_content(&self, marker: &Node) -> Result<JsValue, JsValue> {
        let guard = self.inner.borrow();
        match guard.session.info_for_marker(&guard.dom, marker) {
            Some(info) => serialize(&BubbleContent::from(info), "Failed to serialize bubble"),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Feed a pointer move; `render` receives `{action: "show", content}` or
    /// `{action: "hide"}` once the debounce delay has passed
    #[wasm_bindgen(js_name = pointerMoved)]
    pub fn pointer_moved(&self, target: Option<Node>, render: js_sys::Function) -> Result<(), JsValue> {
        let request = {
            let mut guard = self.inner.borrow_mut();
            let hover_target = guard.classify(target);
            guard.hover.pointer_moved(hover_target)
        };
        match request {
            Some(request) => self.start_timer(request, render),
            None => Ok(()),
        }
    }

    /// The pointer left the bubble element
    #[wasm_bindgen(js_name = bubbleLeft)]
    pub fn bubble_left(&self, render: js_sys::Function) -> Result<(), JsValue> {
        let request = self.inner.borrow_mut().hover.bubble_left();
        match request {
            Some(request) => self.start_timer(request, render),
            None => Ok(()),
        }
    }

    /// The page scrolled; returns the bubble action to apply right away
    pub fn scrolled(&self) -> Result<JsValue, JsValue> {
        let mut guard = self.inner.borrow_mut();
        let command = guard.hover.scrolled();
        match guard.command(command) {
            Some(action) => serialize(&action, "Failed to serialize bubble action"),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Send a highlighted word or a clickable word to the capture server
    ///
    /// When the selected protocol asks for `download`, the page HTML is
    /// stored on the server first and its path travels as `html_file`.
    /// While highlighting is on, the word list is re-synced afterwards so a
    /// newly saved word shows up on the page.
    ///
    /// Resolves to `undefined` when the server accepted the capture, or to
    /// the `org-protocol://` link the caller should open instead.
    #[wasm_bindgen(js_name = captureWord)]
    pub fn capture_word(
        &self,
        element: Node,
        protocols: String,
        item: Option<u32>,
        settings: JsValue,
    ) -> Result<js_sys::Promise, JsValue> {
        let settings: CaptureSettings = deserialize_or_default(settings, "Invalid capture settings")?;
        let (setting, mut payload, config) = {
            let guard = self.inner.borrow();
            let selection = word_selection(&guard.dom, &element).map_err(to_js_error)?;
            let setting = select_protocol(&parse_protocols(&protocols), item.map(|i| i as usize));
            setting.validated_protocol().map_err(to_js_error)?;
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let url = window.location().href().unwrap_or_default();
            let title = window.document().map(|d| d.title()).unwrap_or_default();
            let page = PageContext::new(url, title);
            let payload = CapturePayload::build(&setting, &settings, &page, &selection);
            (setting, payload, guard.config.clone())
        };

        let inner = self.inner.clone();
        Ok(future_to_promise(async move {
            if setting.download {
                match net::upload_source(&config, &page_source().unwrap_or_default()).await {
                    Ok(path) => payload.html_file = Some(path),
                    Err(e) => wasm_warn!("Page upload failed, capturing without html_file: {}", e),
                }
            }

            let fallback = payload.org_protocol_link(&settings);
            let accepted = match net::post_capture(&config, &payload).await {
                Ok(reply) => serde_json::from_str::<CaptureReply>(&reply)
                    .map(|r| r.status == "ok")
                    .unwrap_or(false),
                Err(e) => {
                    wasm_warn!("Capture POST failed, falling back to org-protocol: {}", e);
                    false
                }
            };

            if setting.deselect {
                clear_selection();
            }

            let highlighting = inner.borrow().session.is_active();
            if highlighting {
                if let Err(e) = sync_words(inner).await {
                    wasm_warn!("Re-sync after capture failed: {}", e);
                }
            }

            if accepted {
                Ok(JsValue::UNDEFINED)
            } else {
                Ok(JsValue::from_str(&fallback))
            }
        }))
    }

    /// Wrap every word of the page in a clickable span
    #[wasm_bindgen(js_name = enableClickableWords)]
    pub fn enable_clickable_words(&self) -> Result<usize, JsValue> {
        let mut guard = self.inner.borrow_mut();
        let hostname = guard.config.hostname.clone();
        let root = guard.root().map_err(to_js_error)?;
        let segmenter = IntlSegmenter::new("")
            .map(|s| Box::new(s) as Box<dyn WordSegmenter>)
            .unwrap_or_else(|_| Box::new(UnicodeWordSegmenter));
        wrap_clickable_words(&mut guard.dom, &root, &hostname, segmenter.as_ref()).map_err(to_js_error)
    }

    /// Undo [`enable_clickable_words`](Self::enable_clickable_words)
    #[wasm_bindgen(js_name = disableClickableWords)]
    pub fn disable_clickable_words(&self) -> Result<usize, JsValue> {
        let mut guard = self.inner.borrow_mut();
        let root = guard.root().map_err(to_js_error)?;
        unwrap_clickable_words(&mut guard.dom, &root).map_err(to_js_error)
    }
}

impl PawHighlighter {
    fn start_timer(&self, request: TimerRequest, render: js_sys::Function) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let inner = self.inner.clone();
        let callback = Closure::once_into_js(move || {
            let action = {
                let mut guard = inner.borrow_mut();
                let command = guard.hover.timer_fired(request);
                guard.command(command)
            };
            let Some(action) = action else {
                return;
            };
            if let Ok(value) = serialize(&action, "Failed to serialize bubble action") {
                if let Err(e) = render.call1(&JsValue::NULL, &value) {
                    wasm_error!("Bubble render callback threw: {:?}", e);
                }
            }
        });
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            request.delay_ms as i32,
        )?;
        Ok(())
    }
}

/// Parse a config object, for the options page to validate input
#[wasm_bindgen(js_name = normalizeConfig)]
pub fn normalize_config(config: JsValue) -> Result<JsValue, JsValue> {
    let config: HighlightConfig = deserialize(config, "Invalid highlighter config")?;
    serialize(&config, "Failed to serialize config")
}
