use chrono::Local;
use gloo_timers::callback::Timeout;
use news_flow_shared::feed::{FeedCommand, FeedEvent, FeedState};
use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::api;
use crate::components::{
    article_card::ArticleCard,
    category_item::CategoryItem,
    loading_spinner::{LoadingSpinner, SpinnerSize},
};

// Decouples the initial data load from the first render.
const STARTUP_DELAY_MS: u32 = 500;

/// The reader itself: one stateful page owning the feed state machine.
///
/// Transitions live in the shared crate; this component only forwards
/// events into the machine and executes the fetch commands it returns.
pub struct ReaderPage {
    state: FeedState,
}

impl Component for ReaderPage {
    type Message = FeedEvent;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        Timeout::new(STARTUP_DELAY_MS, move || link.send_message(FeedEvent::Started)).forget();

        ReaderPage {
            state: FeedState::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let commands = self.state.apply(msg, &Local::now());
        for command in commands {
            run_command(ctx, command);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let state = &self.state;
        let toggle_drawer = ctx.link().callback(|_: MouseEvent| FeedEvent::CategoriesDrawerToggled);
        let toggle_hide_read = ctx.link().callback(|_: Event| FeedEvent::HideReadToggled);
        let on_select = ctx
            .link()
            .callback(|shortname: String| FeedEvent::CategorySelected { shortname });

        html! {
            <main class="reader">
                <header class="reader-header">
                    <h1 class="reader-title">{ "NewsFlow" }</h1>
                    <div class="reader-controls">
                        <button type="button" class="drawer-toggle" onclick={toggle_drawer}>
                            { state.drawer_label() }
                        </button>
                        <label class="hide-read-toggle">
                            <input
                                type="checkbox"
                                checked={state.hide_read}
                                onchange={toggle_hide_read}
                            />
                            { "Hide read" }
                        </label>
                    </div>
                </header>

                {
                    if state.show_categories_drawer {
                        html! {
                            <aside class="categories-drawer">
                                { self.view_categories(&on_select) }
                            </aside>
                        }
                    } else {
                        html! {}
                    }
                }

                <section class="article-list">
                    { self.view_articles() }
                </section>
            </main>
        }
    }
}

impl ReaderPage {
    fn view_categories(&self, on_select: &Callback<String>) -> Html {
        let state = &self.state;

        if state.categories_loading {
            return html! { <LoadingSpinner size={SpinnerSize::Small} /> };
        }

        if state.categories.is_empty() {
            return html! { <p class="empty-hint">{ "No categories available." }</p> };
        }

        html! {
            <ul class="category-list">
                { for state.categories.iter().map(|category| html! {
                    <CategoryItem
                        key={category.name.clone()}
                        category={category.clone()}
                        selected_category={state.selected_category.clone()}
                        on_select={on_select.clone()}
                    />
                }) }
            </ul>
        }
    }

    fn view_articles(&self) -> Html {
        let state = &self.state;

        if state.articles_loading {
            return html! { <LoadingSpinner /> };
        }

        if state.articles.is_empty() {
            return html! { <p class="empty-hint">{ "No articles to show." }</p> };
        }

        html! {
            <div class="articles">
                { for state.articles.iter().map(|article| html! {
                    <ArticleCard
                        key={article.id.clone()}
                        article={article.clone()}
                        hide_read={state.hide_read}
                        selected_category={state.selected_category.clone()}
                    />
                }) }
            </div>
        }
    }
}

fn run_command(ctx: &Context<ReaderPage>, command: FeedCommand) {
    match command {
        FeedCommand::FetchCategories { seq } => {
            ctx.link().send_future(async move {
                let categories = match api::fetch_categories().await {
                    Ok(categories) => Some(categories),
                    Err(error) => {
                        warn(&format!("Failed to fetch categories: {error}"));
                        None
                    },
                };
                FeedEvent::CategoriesLoaded { seq, categories }
            });
        },
        FeedCommand::FetchArticles { seq, query } => {
            ctx.link().send_future(async move {
                let articles = match api::fetch_articles(&query).await {
                    Ok(articles) => Some(articles),
                    Err(error) => {
                        warn(&format!("Failed to fetch articles: {error}"));
                        None
                    },
                };
                FeedEvent::ArticlesLoaded { seq, articles }
            });
        },
    }
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}
