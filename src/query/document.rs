//! The hacktivity search document
//!
//! Requests the full hacktivity node shape even though only `report.url` is
//! consumed, so the payload matches what the hacktivity page itself sends.

/// GraphQL operation name
pub const OPERATION_NAME: &str = "HacktivitySearchQuery";

/// GraphQL document for the hacktivity search
pub const HACKTIVITY_SEARCH_QUERY: &str = r"query HacktivitySearchQuery($queryString: String!, $from: Int, $size: Int, $sort: SortInput!) {
  me {
    id
    __typename
  }
  search(
    index: CompleteHacktivityReportIndex
    query_string: $queryString
    from: $from
    size: $size
    sort: $sort
  ) {
    __typename
    total_count
    nodes {
      __typename
      ... on HacktivityDocument {
        id
        _id
        reporter {
          id
          name
          username
          __typename
        }
        cve_ids
        cwe
        severity_rating
        upvoted: upvoted_by_current_user
        report {
          id
          databaseId: _id
          title
          substate
          url
          disclosed_at
          report_generated_content {
            id
            hacktivity_summary
            __typename
          }
          __typename
        }
        votes
        team {
          handle
          name
          medium_profile_picture: profile_picture(size: medium)
          url
          id
          currency
          __typename
        }
        total_awarded_amount
        latest_disclosable_action
        latest_disclosable_activity_at
        submitted_at
        __typename
      }
    }
  }
}";
