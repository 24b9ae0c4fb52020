//! Query engine: derive the visible list from the loaded users.
//!
//! The derived view is recomputed from scratch on every draw; nothing here
//! mutates the loaded list.
use std::cmp::Ordering;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};

use crate::model::User;

/// Field the derived view is ordered by.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Name,
    Email,
    Phone,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Email, SortKey::Phone];

    pub fn field(self, user: &User) -> &str {
        match self {
            SortKey::Name => &user.name,
            SortKey::Email => &user.email,
            SortKey::Phone => &user.phone,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Email => "Email",
            SortKey::Phone => "Phone",
        }
    }

    /// Next key in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Email,
            SortKey::Email => SortKey::Phone,
            SortKey::Phone => SortKey::Name,
        }
    }
}

/// Users whose name contains `query`, ignoring case. An empty query keeps everyone.
pub fn filter_by_name<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let q = query.to_lowercase();
    if q.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|u| u.name.to_lowercase().contains(&q))
        .collect()
}

/// Stable ascending sort on `key` using [`locale_cmp`].
pub fn sort_by_key(users: &mut [&User], key: SortKey) {
    let collator = root_collator();
    users.sort_by(|a, b| collate(collator.as_ref(), key.field(a), key.field(b)));
}

/// Filter then sort, returning an owned list.
pub fn derive_view(users: &[User], query: &str, key: SortKey) -> Vec<User> {
    let mut view = filter_by_name(users, query);
    sort_by_key(&mut view, key);
    view.into_iter().cloned().collect()
}

/// Root-locale (CLDR) collation, with code point order as the final tiebreak
/// so the ordering is total. The empty string sorts first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collate(root_collator().as_ref(), a, b)
}

fn root_collator() -> Option<CollatorBorrowed<'static>> {
    match Collator::try_new(CollatorPreferences::default(), CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            tracing::warn!(error = %err, "root collator unavailable, sorting by code point");
            None
        }
    }
}

fn collate(collator: Option<&CollatorBorrowed<'_>>, a: &str, b: &str) -> Ordering {
    collator
        .map_or(Ordering::Equal, |c| c.compare(a, b))
        .then_with(|| a.cmp(b))
}
