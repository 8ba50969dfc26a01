use std::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, Element, HtmlInputElement};

use crate::dom::{AUTHOR_DATA_ATTR, FILTER_BUTTON_SELECTOR, SEARCH_INPUT_ID};
use crate::ArchivePage;

/// 搜索防抖间隔（毫秒）
const SEARCH_DEBOUNCE_MS: i32 = 200;

thread_local! {
    /// 挂起的防抖定时器句柄 - 每次新按键取消并重新排定
    static PENDING_SEARCH: Cell<Option<i32>> = Cell::new(None);
    /// 防抖回调 - 绑定控件时创建一次，之后重复使用
    static SEARCH_CALLBACK: RefCell<Option<Closure<dyn FnMut()>>> = RefCell::new(None);
}

/// 绑定用户控件：搜索框的防抖监听与分类按钮的点击监听
///
/// 控件缺失时跳过绑定，不报错
pub fn bind_controls(document: &Document) -> Result<(), JsValue> {
    bind_search_input(document)?;
    bind_filter_buttons(document)?;
    Ok(())
}

/// 搜索框 - 每次按键只重排定时器，定时器触发后才读取输入值
fn bind_search_input(document: &Document) -> Result<(), JsValue> {
    let Some(input) = document.get_element_by_id(SEARCH_INPUT_ID) else {
        return Ok(());
    };

    let fire = Closure::wrap(Box::new(|| {
        PENDING_SEARCH.with(|pending| pending.set(None));
        if let Err(e) = commit_search() {
            console::error_1(&JsValue::from_str(&format!("提交搜索词失败: {}", e)));
        }
    }) as Box<dyn FnMut()>);
    SEARCH_CALLBACK.with(|callback| *callback.borrow_mut() = Some(fire));

    let on_input = Closure::wrap(Box::new(|| {
        if let Err(e) = schedule_search() {
            console::error_1(&e);
        }
    }) as Box<dyn FnMut()>);
    input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    Ok(())
}

/// 分类按钮 - 点击立即切换分类并重绘，不走防抖
fn bind_filter_buttons(document: &Document) -> Result<(), JsValue> {
    let buttons = document.query_selector_all(FILTER_BUTTON_SELECTOR)?;
    for index in 0..buttons.length() {
        let Some(node) = buttons.item(index) else {
            continue;
        };
        let Ok(button) = node.dyn_into::<Element>() else {
            continue;
        };
        let Some(token) = button.get_attribute(AUTHOR_DATA_ATTR) else {
            continue;
        };

        let on_click = Closure::wrap(Box::new(move || {
            if let Err(e) = ArchivePage::set_author_filter(&token) {
                console::error_1(&JsValue::from_str(&format!("切换分类失败: {}", e)));
            }
        }) as Box<dyn FnMut()>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

/// 取消上一次未触发的定时器，重新排定防抖回调
fn schedule_search() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window 不可用"))?;

    PENDING_SEARCH.with(|pending| {
        if let Some(handle) = pending.take() {
            window.clear_timeout_with_handle(handle);
        }
    });

    let handle = SEARCH_CALLBACK.with(|callback| -> Result<i32, JsValue> {
        let callback = callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| JsValue::from_str("防抖回调未初始化"))?;
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        window.set_timeout_with_callback_and_timeout_and_arguments_0(function, SEARCH_DEBOUNCE_MS)
    })?;

    PENDING_SEARCH.with(|pending| pending.set(Some(handle)));
    Ok(())
}

/// 定时器触发后读取搜索框当前值并提交
fn commit_search() -> Result<(), String> {
    let input = crate::dom::document()
        .ok()
        .and_then(|document| document.get_element_by_id(SEARCH_INPUT_ID))
        .ok_or("搜索框不存在")?;
    let input: HtmlInputElement = input.dyn_into().map_err(|_| "搜索框类型错误")?;
    ArchivePage::commit_search_term(&input.value())
}
