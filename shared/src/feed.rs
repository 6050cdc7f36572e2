//! The feed state machine: one explicit state struct plus a pure transition
//! function. Every transition returns the fetches to perform; the view layer
//! executes them and feeds the settled results back in as events.
//!
//! Each fetch kind carries a monotonic sequence number. A response whose
//! number is not the latest issued is discarded, so rapid category switches
//! always settle on the most recent selection instead of whichever response
//! happened to arrive last.

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::query::{build_article_query, ArticleQuery};
use crate::{Article, Category};

/// Lifecycle of the feed. A category switch re-enters `LoadingArticles`
/// from `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    LoadingCategories,
    LoadingArticles,
    Ready,
}

/// Everything that can happen to the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Startup trigger, fired once after the initial render delay.
    Started,
    /// A categories fetch settled. `None` means the fetch failed and was
    /// already logged at the call site.
    CategoriesLoaded {
        seq: u64,
        categories: Option<Vec<Category>>,
    },
    /// An articles fetch settled; same failure convention.
    ArticlesLoaded {
        seq: u64,
        articles: Option<Vec<Article>>,
    },
    /// The user clicked a category (the shortname, empty for "All").
    CategorySelected { shortname: String },
    HideReadToggled,
    CategoriesDrawerToggled,
}

/// Effects requested by a transition. The sequence number must be echoed
/// back in the corresponding completion event.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedCommand {
    FetchCategories { seq: u64 },
    FetchArticles { seq: u64, query: ArticleQuery },
}

/// The whole view-relevant state of the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub phase: FeedPhase,
    pub articles: Vec<Article>,
    pub categories: Vec<Category>,
    pub articles_loading: bool,
    pub categories_loading: bool,
    /// Shortname of the active selection; empty string means "All".
    pub selected_category: String,
    pub hide_read: bool,
    pub show_categories_drawer: bool,
    categories_seq: u64,
    articles_seq: u64,
    // Selection is recorded only once its article fetch settles.
    pending_selection: Option<String>,
}

impl FeedState {
    pub fn new() -> Self {
        FeedState {
            phase: FeedPhase::Idle,
            articles: Vec::new(),
            categories: Vec::new(),
            articles_loading: false,
            categories_loading: false,
            selected_category: String::new(),
            hide_read: false,
            show_categories_drawer: false,
            categories_seq: 0,
            articles_seq: 0,
            pending_selection: None,
        }
    }

    /// Apply one event and return the fetches to perform. `now` anchors the
    /// time bound of event queries.
    pub fn apply(&mut self, event: FeedEvent, now: &DateTime<Local>) -> Vec<FeedCommand> {
        match event {
            FeedEvent::Started => {
                self.phase = FeedPhase::LoadingCategories;
                self.categories_loading = true;
                self.categories_seq += 1;
                debug!(seq = self.categories_seq, "requesting categories");
                vec![FeedCommand::FetchCategories {
                    seq: self.categories_seq,
                }]
            },
            FeedEvent::CategoriesLoaded { seq, categories } => {
                if seq != self.categories_seq {
                    warn!(seq, latest = self.categories_seq, "discarding stale categories response");
                    return Vec::new();
                }
                self.categories_loading = false;
                self.categories = match categories {
                    Some(loaded) => {
                        let mut with_all = Vec::with_capacity(loaded.len() + 1);
                        with_all.push(Category::all());
                        with_all.extend(loaded);
                        with_all
                    },
                    None => Vec::new(),
                };
                // Articles wait for categories: the default query needs the
                // events category id to exclude event posts.
                self.pending_selection = None;
                self.request_articles(None, now)
            },
            FeedEvent::ArticlesLoaded { seq, articles } => {
                if seq != self.articles_seq {
                    warn!(seq, latest = self.articles_seq, "discarding stale articles response");
                    return Vec::new();
                }
                self.articles_loading = false;
                self.articles = articles.unwrap_or_default();
                if let Some(selection) = self.pending_selection.take() {
                    self.selected_category = selection;
                }
                self.phase = FeedPhase::Ready;
                Vec::new()
            },
            FeedEvent::CategorySelected { shortname } => {
                // Last match wins; an unknown shortname falls back to the
                // default feed.
                let selection = self
                    .categories
                    .iter()
                    .filter(|category| category.shortname == shortname)
                    .next_back()
                    .cloned();
                self.pending_selection =
                    Some(selection.as_ref().map(|c| c.shortname.clone()).unwrap_or_default());
                self.request_articles(selection.as_ref(), now)
            },
            FeedEvent::HideReadToggled => {
                self.hide_read = !self.hide_read;
                Vec::new()
            },
            FeedEvent::CategoriesDrawerToggled => {
                self.show_categories_drawer = !self.show_categories_drawer;
                Vec::new()
            },
        }
    }

    /// Label of the categories drawer toggle.
    pub fn drawer_label(&self) -> &'static str {
        if self.show_categories_drawer {
            "Hide categories"
        } else {
            "Show categories"
        }
    }

    fn request_articles(
        &mut self,
        selection: Option<&Category>,
        now: &DateTime<Local>,
    ) -> Vec<FeedCommand> {
        self.phase = FeedPhase::LoadingArticles;
        self.articles_loading = true;
        self.articles_seq += 1;
        debug!(seq = self.articles_seq, "requesting articles");
        let query = build_article_query(selection, &self.categories, now);
        vec![FeedCommand::FetchArticles {
            seq: self.articles_seq,
            query,
        }]
    }
}

impl Default for FeedState {
    fn default() -> Self {
        FeedState::new()
    }
}
