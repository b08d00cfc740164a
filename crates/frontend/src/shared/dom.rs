//! Small DOM helpers used by event handlers.

use contracts::shared::drag_drop::Rect;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlInputElement};

/// Диалог подтверждения браузера; `false`, если окна нет
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Прямоугольники дочерних `selector` элементов текущей цели события,
/// каждый вместе с атрибутом `data-index`.
pub fn child_rects(ev: &web_sys::Event, selector: &str) -> Vec<(Rect, usize)> {
    let Some(container) = ev
        .current_target()
        .and_then(|t| t.dyn_into::<Element>().ok())
    else {
        return Vec::new();
    };
    let Ok(nodes) = container.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(|el| {
            let index = el.get_attribute("data-index")?.parse::<usize>().ok()?;
            let r = el.get_bounding_client_rect();
            Some((Rect::new(r.left(), r.top(), r.width(), r.height()), index))
        })
        .collect()
}

/// Текст первого файла, выбранного в `<input type="file">`
pub async fn read_selected_file(ev: web_sys::Event) -> Result<Option<(String, String)>, String> {
    let input = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .ok_or("Event target is not an input")?;
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;
    let text = text.as_string().ok_or("File content is not text")?;
    Ok(Some((file.name(), text)))
}
