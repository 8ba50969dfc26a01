use once_cell::sync::OnceCell;
use std::sync::Mutex;
use wasm_bindgen::prelude::*;

// 导出模块
pub mod controller;
pub mod dom;
pub mod filter;
pub mod loader;
pub mod models;
pub mod render;

use models::{ArchiveStats, Post, QueryState};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// 全局查询状态
static STATE: OnceCell<Mutex<QueryState>> = OnceCell::new();

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    "1.0.0".to_string()
}

/// 全局状态访问 - 首次访问时以默认查询条件创建
fn state() -> &'static Mutex<QueryState> {
    STATE.get_or_init(|| Mutex::new(QueryState::default()))
}

/// 归档页核心 - 串联加载、筛选与重绘
pub struct ArchivePage;

impl ArchivePage {
    /// 装载数据集：写入查询状态，计算全库统计并完成首次渲染
    ///
    /// 统计基于完整数据集计算一次，之后的筛选不再更新
    pub fn install_posts(posts: Vec<Post>) -> Result<(), String> {
        let stats = render::compute_stats(&posts);
        {
            let mut state = state().lock().map_err(|_| "获取状态锁失败")?;
            state.posts = posts;
            state.stats = stats;
        }
        dom::write_stats(&stats).map_err(|_| "写入统计区域失败")?;
        Self::refresh_results()
    }

    /// 切换作者分类，更新按钮激活状态并立即重绘
    pub fn set_author_filter(token: &str) -> Result<(), String> {
        {
            let mut state = state().lock().map_err(|_| "获取状态锁失败")?;
            state.author_filter = token.to_string();
        }
        dom::mark_active_button(token).map_err(|_| "更新按钮状态失败")?;
        Self::refresh_results()
    }

    /// 提交搜索词并重绘 - 存储前统一去空白并转小写
    pub fn commit_search_term(raw: &str) -> Result<(), String> {
        let term = raw.trim().to_lowercase();
        {
            let mut state = state().lock().map_err(|_| "获取状态锁失败")?;
            state.search_term = term;
        }
        Self::refresh_results()
    }

    /// 重新执行 筛选 -> 分组 -> 渲染 流水线
    pub fn refresh_results() -> Result<(), String> {
        let html = {
            let state = state().lock().map_err(|_| "获取状态锁失败")?;
            let filtered =
                filter::filter_posts(&state.posts, &state.author_filter, &state.search_term);
            render::render_posts_html(&filtered)
        };
        dom::write_results(&html).map_err(|_| "写入结果区域失败".to_string())
    }

    /// 当前全库统计
    pub fn current_stats() -> Result<ArchiveStats, String> {
        let state = state().lock().map_err(|_| "获取状态锁失败")?;
        Ok(state.stats)
    }
}

/// 归档页JS接口 - 提供给JavaScript使用的页面API
#[wasm_bindgen]
pub struct ArchivePageJS;

#[wasm_bindgen]
impl ArchivePageJS {
    /// 初始化页面：绑定用户控件并发起一次性的数据集加载
    #[wasm_bindgen]
    pub fn init() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let document = dom::document()?;
        controller::bind_controls(&document)?;

        wasm_bindgen_futures::spawn_local(loader::load_and_render());
        Ok(())
    }

    /// 切换作者分类
    #[wasm_bindgen]
    pub fn set_filter(author: &str) -> Result<(), JsValue> {
        ArchivePage::set_author_filter(author).map_err(|e| JsValue::from_str(&e))
    }

    /// 获取全库统计
    #[wasm_bindgen]
    pub fn stats() -> Result<JsValue, JsValue> {
        let stats = ArchivePage::current_stats().map_err(|e| JsValue::from_str(&e))?;
        serde_wasm_bindgen::to_value(&stats)
            .map_err(|e| JsValue::from_str(&format!("序列化统计失败: {}", e)))
    }
}
