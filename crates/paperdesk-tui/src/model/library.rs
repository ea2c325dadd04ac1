use paperdesk_api::Paper;

/// Case-insensitive substring match against the title, any author, or any
/// tag. An empty query matches everything.
pub fn matches_query(paper: &Paper, query_lower: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }
    paper.title.to_lowercase().contains(query_lower)
        || paper
            .authors
            .iter()
            .any(|a| a.to_lowercase().contains(query_lower))
        || paper
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(query_lower))
}

/// Compute filtered indices into the collection for the current search query.
/// Runs synchronously on every query change; never touches the network.
pub fn filtered_indices(papers: &[Paper], search_query: &str) -> Vec<usize> {
    let query_lower = search_query.to_lowercase();
    papers
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_query(p, &query_lower))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, authors: &[&str], tags: &[&str]) -> Paper {
        Paper {
            title: title.to_string(),
            authors: authors.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            ..Paper::default()
        }
    }

    #[test]
    fn empty_query_matches_all() {
        let papers = vec![paper("A", &[], &[]), paper("B", &[], &[])];
        assert_eq!(filtered_indices(&papers, ""), vec![0, 1]);
    }

    #[test]
    fn query_matches_author_case_insensitively() {
        let papers = vec![
            paper("Attention Is All You Need", &["Dr. Smith"], &[]),
            paper("Unrelated", &["Someone Else"], &[]),
        ];
        assert_eq!(filtered_indices(&papers, "smith"), vec![0]);
    }

    #[test]
    fn query_matches_tag() {
        let papers = vec![
            paper("One", &[], &["genomics"]),
            paper("Two", &[], &["NLP"]),
        ];
        assert_eq!(filtered_indices(&papers, "nlp"), vec![1]);
    }

    #[test]
    fn query_matches_title_substring() {
        let papers = vec![paper("Scaling Laws for Neural LMs", &[], &[])];
        assert_eq!(filtered_indices(&papers, "scaling"), vec![0]);
    }

    #[test]
    fn no_match_yields_empty() {
        let papers = vec![paper("One", &["A"], &["b"])];
        assert!(filtered_indices(&papers, "zzz").is_empty());
    }
}
