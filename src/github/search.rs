use anyhow::Result;
use futures::stream::{self, StreamExt};
use http::Uri;
use octocrab::models::issues::Issue;
use octocrab::Octocrab;

use crate::github::types::{PullRequest, PullRequestStream, RepoRef};

const PAGE_SIZE: u8 = 100;

/// Search for open, non-archived pull requests in an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub org: String,
    pub sort: String,
    pub order: String,
}

impl SearchQuery {
    /// Open PRs in `org`, oldest first
    pub fn open_prs(org: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            sort: "created".to_string(),
            order: "asc".to_string(),
        }
    }

    /// The qualifier string passed as `q`
    pub fn to_query_string(&self) -> String {
        format!("org:{} archived:false is:open type:pr", self.org)
    }
}

/// Paging state carried between items of the search stream
struct SearchCursor {
    client: Octocrab,
    buffered: std::vec::IntoIter<Issue>,
    next: Option<Uri>,
}

/// Run the search and return its results as a lazy stream
///
/// Only the first page is fetched eagerly (it carries the total count); later pages
/// are requested as the stream is consumed.
pub async fn search_prs(client: &Octocrab, query: &SearchQuery) -> Result<PullRequestStream> {
    let q = query.to_query_string();
    let page = client
        .search()
        .issues_and_pull_requests(&q)
        .sort(query.sort.as_str())
        .order(query.order.as_str())
        .per_page(PAGE_SIZE)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("GitHub search failed: {}", e))?;

    let total_count = page.total_count;
    let cursor = SearchCursor {
        client: client.clone(),
        buffered: page.items.into_iter(),
        next: page.next,
    };

    Ok(PullRequestStream {
        total_count,
        items: stream::try_unfold(cursor, advance).boxed(),
    })
}

/// Yield the next PR, fetching the following page when the buffer runs dry
async fn advance(mut cursor: SearchCursor) -> Result<Option<(PullRequest, SearchCursor)>> {
    loop {
        while let Some(issue) = cursor.buffered.next() {
            if let Some(pr) = to_pull_request(issue) {
                return Ok(Some((pr, cursor)));
            }
        }

        if cursor.next.is_none() {
            return Ok(None);
        }

        match cursor.client.get_page::<Issue>(&cursor.next).await? {
            Some(page) => {
                cursor.next = page.next;
                cursor.buffered = page.items.into_iter();
            }
            None => return Ok(None),
        }
    }
}

/// Convert a search hit into a PR; plain issues and unparsable repos are skipped
fn to_pull_request(issue: Issue) -> Option<PullRequest> {
    issue.pull_request.as_ref()?;
    let repo = RepoRef::from_api_url(issue.repository_url.as_str())?;

    Some(PullRequest {
        id: issue.id.into_inner(),
        repo,
        created_at: issue.created_at,
        url: issue.html_url.to_string(),
        title: issue.title,
        author: issue.user.login,
    })
}
