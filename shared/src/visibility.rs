//! Display-or-hide policy for fetched articles. Pure; the view re-evaluates
//! it whenever the read flag, the hide-read switch, or the selected
//! category changes.

use crate::{Article, EVENTS_SHORTNAME};

/// Whether an article should currently be displayed.
///
/// Hidden when the hide-read switch is on and this article was marked read,
/// when the article is an event post and the events view is not active, or
/// when a category is selected that the article does not carry.
pub fn is_article_visible(
    article: &Article,
    hide_read: bool,
    read: bool,
    selected_shortname: &str,
) -> bool {
    if hide_read && read {
        return false;
    }

    if article.is_event() && selected_shortname != EVENTS_SHORTNAME {
        return false;
    }

    if !selected_shortname.is_empty()
        && !article.categories.iter().any(|category| category.shortname == selected_shortname)
    {
        return false;
    }

    true
}
