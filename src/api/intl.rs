//! `Intl.Segmenter` binding
//!
//! Browsers ship dictionary-based word segmentation for Japanese and
//! Chinese through `Intl.Segmenter`. When it is available the browser build
//! uses it for CJK text instead of the UAX #29 fallback.

use crate::utils::{WordSegment, WordSegmenter};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Intl, js_name = Segmenter)]
    type JsSegmenter;

    #[wasm_bindgen(constructor, js_namespace = Intl, js_class = "Segmenter", catch)]
    fn new(locales: &JsValue, options: &JsValue) -> Result<JsSegmenter, JsValue>;

    #[wasm_bindgen(method, js_class = "Segmenter")]
    fn segment(this: &JsSegmenter, input: &str) -> JsValue;
}

/// Word segmenter backed by `Intl.Segmenter`
pub struct IntlSegmenter {
    inner: JsSegmenter,
}

impl IntlSegmenter {
    /// Word-granularity segmenter for `locale` (e.g. `ja-JP`)
    pub fn new(locale: &str) -> Result<Self, JsValue> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"granularity".into(), &"word".into())?;
        let inner = JsSegmenter::new(&JsValue::from_str(locale), &options)?;
        Ok(Self { inner })
    }

    fn collect(&self, text: &str) -> Result<Vec<WordSegment>, JsValue> {
        let segments = self.inner.segment(text);
        let iter = js_sys::try_iter(&segments)?
            .ok_or_else(|| JsValue::from_str("Intl.Segmenter result is not iterable"))?;

        let mut out = Vec::new();
        for item in iter {
            let item = item?;
            let text = js_sys::Reflect::get(&item, &"segment".into())?
                .as_string()
                .unwrap_or_default();
            let is_word_like = js_sys::Reflect::get(&item, &"isWordLike".into())?
                .as_bool()
                .unwrap_or(false);
            out.push(WordSegment::new(text, is_word_like));
        }
        Ok(out)
    }
}

impl WordSegmenter for IntlSegmenter {
    fn segment(&self, text: &str) -> Vec<WordSegment> {
        match self.collect(text) {
            Ok(segments) => segments,
            Err(e) => {
                log::warn!("Intl.Segmenter failed, falling back to UAX #29: {:?}", e);
                crate::utils::UnicodeWordSegmenter.segment(text)
            }
        }
    }
}
