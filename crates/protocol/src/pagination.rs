use std::future::Future;

/// One decoded page of a list-typed resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            items,
            next_token: continuation(next_token),
        }
    }
}

/// Normalize a continuation token: blank means "no more pages", anything else is forwarded
/// exactly as the upstream sent it.
pub fn continuation(token: Option<String>) -> Option<String> {
    token.filter(|token| !token.trim().is_empty())
}

/// Fetch every page of a result set, first without a token and then with each returned token.
///
/// Pages are requested one after another; the next request is only issued once the previous page
/// has been fully decoded and classified by `fetch`. The first failure aborts the walk and is
/// returned as-is, without the pages gathered so far.
pub async fn walk_pages<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut accumulated = Vec::new();
    let mut token = None;

    loop {
        let page = fetch(token.take()).await?;
        accumulated.extend(page.items);
        match continuation(page.next_token) {
            Some(next) => token = Some(next),
            None => return Ok(accumulated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[tokio::test]
    async fn walks_until_token_runs_out() {
        let calls = RefCell::new(Vec::new());
        let items = walk_pages(|token: Option<String>| {
            calls.borrow_mut().push(token.clone());
            async move {
                let page = match token.as_deref() {
                    None => Page::new(vec![1, 2], Some("A".to_string())),
                    Some("A") => Page::new(vec![3, 4, 5], Some("B".to_string())),
                    Some("B") => Page::new(Vec::new(), None),
                    Some(other) => return Err(format!("unexpected token {other}")),
                };
                Ok::<_, String>(page)
            }
        })
        .await
        .expect("walk");

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            calls.into_inner(),
            vec![None, Some("A".to_string()), Some("B".to_string())]
        );
    }

    #[tokio::test]
    async fn blank_token_terminates() {
        let mut calls = 0;
        let items = walk_pages(|_token| {
            calls += 1;
            async { Ok::<_, String>(Page::new(vec!["only"], Some("   ".to_string()))) }
        })
        .await
        .expect("walk");

        assert_eq!(items, vec!["only"]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn failure_on_a_later_page_discards_everything() {
        let result = walk_pages(|token: Option<String>| async move {
            match token {
                None => Ok(Page::new(vec![1, 2], Some("next".to_string()))),
                Some(_) => Err("page 2 failed".to_string()),
            }
        })
        .await;

        assert_eq!(result, Err("page 2 failed".to_string()));
    }

    #[test]
    fn continuation_keeps_opaque_tokens_intact() {
        assert_eq!(
            continuation(Some(" tok+/= ".to_string())),
            Some(" tok+/= ".to_string())
        );
        assert_eq!(continuation(Some(String::new())), None);
        assert_eq!(continuation(Some(" \t".to_string())), None);
        assert_eq!(continuation(None), None);
    }
}
