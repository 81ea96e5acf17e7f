//! HTTP client for the tracker REST API
//!
//! Every request goes to `{endpoint}/api{path}` as an authenticated GET.
//! Responses are decoded into the schema types in [`crate::types`].

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::types::{Article, Credential, Issue, IssueWithComments, ProjectRef, User};

use super::{
    commented_by_query, created_by_query, paginate, resolved_by_query, PageProgress, TrackerApi,
    PAGE_SIZE,
};

const USER_FIELDS: &str = "id,login,fullName,avatarUrl";
const PROJECT_FIELDS: &str = "id,name,shortName";
const ISSUE_FIELDS: &str = "id,idReadable,summary,created,resolved,\
    project(id,name,shortName),customFields(name,value(name))";
const ISSUE_WITH_COMMENTS_FIELDS: &str = "id,idReadable,summary,created,resolved,\
    project(id,name,shortName),customFields(name,value(name)),\
    comments(id,text,created,author(id,login,fullName))";
const ARTICLE_FIELDS: &str = "id,idReadable,summary,content,created,updated,\
    reporter(id,login,fullName),project(id,name,shortName)";

/// HTTP client for the tracker API
pub struct TrackerClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl TrackerClient {
    /// Create a client bound to one credential.
    ///
    /// Fails with [`Error::Validation`] when the endpoint or token is empty.
    pub fn new(credential: &Credential) -> Result<Self> {
        let endpoint = credential.base_endpoint().trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(Error::Validation("tracker endpoint is required".to_string()));
        }
        if credential.token().trim().is_empty() {
            return Err(Error::Validation("tracker token is required".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", credential.token()))
            .map_err(|e| Error::Validation(format!("invalid token: {}", e)))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: format!("{}/api", endpoint),
        })
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| Error::Transport(format!("failed to read response: {}", e)))?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            tracing::debug!(%url, status = status.as_u16(), "Tracker returned error status");

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                Err(Error::Auth {
                    status: status.as_u16(),
                    body,
                })
            } else {
                Err(Error::Protocol {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    /// Load every page of a list endpoint.
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        on_page: PageProgress<'_>,
    ) -> Result<Vec<T>> {
        paginate(
            |skip| {
                let mut params = query.to_vec();
                params.push(("$top", PAGE_SIZE.to_string()));
                params.push(("$skip", skip.to_string()));
                async move { self.get_json::<Vec<T>>(path, &params).await }
            },
            on_page,
        )
        .await
    }

    async fn search_issues<T: DeserializeOwned>(
        &self,
        query: String,
        fields: &str,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<T>> {
        tracing::debug!(%query, "Searching issues");
        self.get_all(
            "/issues",
            &[("query", query), ("fields", fields.to_string())],
            on_page,
        )
        .await
    }
}

impl TrackerApi for TrackerClient {
    async fn get_current_user(&self) -> Result<User> {
        self.get_json("/users/me", &[("fields", USER_FIELDS.to_string())])
            .await
    }

    async fn get_issues_created_by(
        &self,
        login: &str,
        start: NaiveDate,
        end: NaiveDate,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<Issue>> {
        self.search_issues(created_by_query(login, start, end), ISSUE_FIELDS, on_page)
            .await
    }

    async fn get_issues_resolved_by(
        &self,
        login: &str,
        start: NaiveDate,
        end: NaiveDate,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<Issue>> {
        self.search_issues(resolved_by_query(login, start, end), ISSUE_FIELDS, on_page)
            .await
    }

    async fn get_issues_with_comments_by(
        &self,
        login: &str,
        start: NaiveDate,
        end: NaiveDate,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<IssueWithComments>> {
        self.search_issues(
            commented_by_query(login, start, end),
            ISSUE_WITH_COMMENTS_FIELDS,
            on_page,
        )
        .await
    }

    async fn get_project_articles(
        &self,
        project_short_name: &str,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<Article>> {
        let path = format!(
            "/admin/projects/{}/articles",
            urlencoding::encode(project_short_name)
        );
        self.get_all(&path, &[("fields", ARTICLE_FIELDS.to_string())], on_page)
            .await
    }

    async fn get_projects(&self) -> Result<Vec<ProjectRef>> {
        self.get_json(
            "/admin/projects",
            &[
                ("fields", PROJECT_FIELDS.to_string()),
                ("$top", PAGE_SIZE.to_string()),
            ],
        )
        .await
    }
}
