use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const DEFAULT_PER_PAGE: u64 = 20;
const MAX_PER_PAGE: u64 = 100;

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }

    /// Cut one page out of an already ordered, fully materialized list.
    pub fn from_vec<S>(all: Vec<S>, query: &PaginationQuery) -> Self
    where
        S: Into<T>,
    {
        let (page, per_page) = query.resolve();
        let total = all.len() as u64;
        let skip = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
        let take = usize::try_from(per_page).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(skip).take(take).map(Into::into).collect();
        Self::new(items, total, page, per_page)
    }
}

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PaginationQuery {
    /// Page is 1-based; per_page is clamped to `1..=100`.
    pub fn resolve(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        (page, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_with_remainder() {
        let resp = PaginatedResponse::<String>::new(vec![], 101, 1, 20);
        assert_eq!(resp.total_pages, 6);
    }

    #[test]
    fn total_pages_zero_per_page() {
        let resp = PaginatedResponse::<String>::new(vec![], 10, 1, 0);
        assert_eq!(resp.total_pages, 0);
    }

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(PaginationQuery::default().resolve(), (1, 20));
        let query = PaginationQuery {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(query.resolve(), (1, 100));
    }

    #[test]
    fn from_vec_slices_requested_page() {
        let query = PaginationQuery {
            page: Some(2),
            per_page: Some(2),
        };
        let resp = PaginatedResponse::<u32>::from_vec(vec![1u32, 2, 3, 4, 5], &query);
        assert_eq!(resp.items, vec![3, 4]);
        assert_eq!(resp.total, 5);
        assert_eq!(resp.total_pages, 3);
    }

    #[test]
    fn from_vec_past_the_end_is_empty() {
        let query = PaginationQuery {
            page: Some(9),
            per_page: Some(10),
        };
        let resp = PaginatedResponse::<u32>::from_vec(vec![1u32, 2], &query);
        assert!(resp.items.is_empty());
        assert_eq!(resp.total, 2);
    }
}
