//! Client Commands
//!
//! TigerStyle: One function per CLI action, written against the store and
//! an output sink.
//!
//! Operator-facing conditions (unknown ids, non-numeric input, nothing to
//! modify) are written to `out` as messages and are not errors. Only store
//! I/O failures and write failures on `out` propagate.

use std::collections::BTreeSet;
use std::io::Write;

use crate::post::Post;
use crate::render;
use crate::store::{PostStore, Posts};

/// Keyword accepted by `print` in place of a list of ids
pub const PRINT_ALL_KEYWORD: &str = "all";

/// `list`: table of every post
pub fn list_posts(store: &PostStore, sort_by_date: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let posts = store.load(None)?;
    write_table(&posts, sort_by_date, out)
}

/// `search`: table of posts matching `query`
pub fn search_posts(
    store: &PostStore,
    query: &str,
    sort_by_date: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let posts = store.search(query)?;
    if posts.is_empty() {
        writeln!(out, "No posts match query: {}", query)?;
        return Ok(());
    }
    write_table(&posts, sort_by_date, out)
}

/// `print`: full view of the requested posts (`all` or numeric ids)
pub fn print_posts(
    store: &PostStore,
    ids: &[String],
    sort_by_date: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let posts = if ids.iter().any(|id| id == PRINT_ALL_KEYWORD) {
        store.load(None)?
    } else {
        let filter: BTreeSet<u64> = match ids
            .iter()
            .map(|id| id.parse::<u64>())
            .collect::<Result<BTreeSet<u64>, _>>()
        {
            Ok(filter) => filter,
            Err(_) => {
                writeln!(out, "Post IDs should be numbers")?;
                return Ok(());
            }
        };
        store.load(Some(&filter))?
    };

    if posts.is_empty() {
        writeln!(out, "Post ID(s) not found: {}", ids.join(" "))?;
        return Ok(());
    }

    for (id, record) in render::ordered(&posts, sort_by_date) {
        writeln!(out, "{}", render::post_block(id, record))?;
    }
    Ok(())
}

/// `add`: save a new post and report its id
pub fn add_post(store: &PostStore, title: &str, body: &str, out: &mut impl Write) -> anyhow::Result<u64> {
    let mut post = Post::new(title, body);
    let id = post.save(store)?;
    writeln!(out, "Added post {}", id)?;
    Ok(id)
}

/// `modify`: replace the title and/or body of an existing post.
///
/// Returns whether a write happened.
pub fn modify_post(
    store: &PostStore,
    id: u64,
    title: Option<String>,
    body: Option<String>,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let title = title.filter(|t| !t.is_empty());
    let body = body.filter(|b| !b.is_empty());

    if title.is_none() && body.is_none() {
        writeln!(out, "Either title or body are required for post modification")?;
        return Ok(false);
    }

    let filter = BTreeSet::from([id]);
    let Some(existing) = store.load(Some(&filter))?.remove(&id) else {
        writeln!(out, "Post id not found: {}", id)?;
        return Ok(false);
    };

    let mut post = Post::with_id(
        id,
        title.unwrap_or(existing.title),
        body.unwrap_or(existing.body),
    );
    post.save(store)?;
    writeln!(out, "Modified post {}", id)?;
    Ok(true)
}

/// `delete`: remove a post
pub fn delete_post(store: &PostStore, id: u64, out: &mut impl Write) -> anyhow::Result<bool> {
    let deleted = store.delete(id)?;
    if deleted {
        writeln!(out, "Deleted post {}", id)?;
    } else {
        writeln!(out, "Post id not found: {}", id)?;
    }
    Ok(deleted)
}

fn write_table(posts: &Posts, sort_by_date: bool, out: &mut impl Write) -> anyhow::Result<()> {
    for line in render::post_table(posts, sort_by_date) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
