use news_flow_shared::visibility::is_article_visible;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::models::Article;

#[derive(Properties, PartialEq, Clone)]
pub struct ArticleCardProps {
    pub article: Article,
    pub hide_read: bool,
    pub selected_category: AttrValue,
}

/// One article row. The read flag lives in this component instance only; it
/// is never persisted and resets with the card.
#[function_component(ArticleCard)]
pub fn article_card(props: &ArticleCardProps) -> Html {
    let read = use_state(|| false);

    let on_read_change = {
        let read = read.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                read.set(target.checked());
            }
        })
    };

    if !is_article_visible(&props.article, props.hide_read, *read, &props.selected_category) {
        return html! {};
    }

    let article = &props.article;
    html! {
        <article class="article-card">
            <div class="article-header">
                <h3 class="article-title">
                    { article.display_title() }
                    <a
                        class="article-link"
                        target="_blank"
                        rel="noreferrer"
                        href={article.link.clone()}
                    >
                        <i class="fas fa-external-link-alt" aria-hidden="true"></i>
                    </a>
                </h3>
                <h4 class="article-datetime">{ article.display_time() }</h4>
            </div>
            <div class="article-actions">
                <label class="article-read-toggle">
                    <input type="checkbox" checked={*read} onchange={on_read_change} />
                    { "Mark as read" }
                </label>
            </div>
        </article>
    }
}
