//! Remote question/answer store backed by a word trie
//!
//! Questions live in a Dgraph-hosted trie: the root node fans out into one
//! node per first word, and so on down the question. A node that ends a
//! stored question is flagged as an end node and owns a single answer
//! child. Lookups and inserts walk the trie one word per round trip, the
//! same shape the graph exposes them in.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::normalize::normalize;

/// Answer returned when the question is not in the store
pub const FALLBACK_ANSWER: &str = "I don't have an answer for you!";

/// Trait for question/answer lookup stores
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Look up the stored answer for a question, falling back to
    /// [`FALLBACK_ANSWER`] when none is stored.
    async fn answer_for(&self, question: &str) -> Result<String>;

    /// Store an answer under a question. Storing a question that already
    /// exists is a no-op.
    async fn add_answer(&self, question: &str, answer: &str) -> Result<()>;
}

/// One node of the question trie, as stored in the graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TrieNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uid: Option<String>,
    #[serde(rename = "TrieNode.text", default, skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(rename = "TrieNode.isRoot", default)]
    is_root: bool,
    #[serde(rename = "TrieNode.isEnd", default)]
    is_end: bool,
    #[serde(rename = "TrieNode.isAnswer", default)]
    is_answer: bool,
    #[serde(rename = "TrieNode.nodes", default, skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<TrieNode>,
}

impl TrieNode {
    fn child_matching(&self, word: &str) -> Option<&TrieNode> {
        self.nodes.iter().find(|child| child.text == word)
    }

    /// The answer child of an end node
    fn answer_child(&self) -> Option<&TrieNode> {
        self.nodes
            .iter()
            .find(|child| child.is_answer)
            .or_else(|| self.nodes.first())
    }
}

/// Build the trie chain for the unmatched suffix of a question, terminated
/// by the answer leaf.
fn build_suffix(words: &[&str], answer: &str) -> TrieNode {
    let mut node = TrieNode {
        text: answer.to_string(),
        is_answer: true,
        ..Default::default()
    };

    for (offset, word) in words.iter().enumerate().rev() {
        node = TrieNode {
            text: word.to_string(),
            is_end: offset + 1 == words.len(),
            nodes: vec![node],
            ..Default::default()
        };
    }

    node
}

const ROOT_QUERY: &str = r#"
query {
  roots(func: eq(TrieNode.isRoot, true)) {
    uid
  }
}"#;

const NODE_QUERY: &str = r#"
query node($a: string) {
  words(func: uid($a)) {
    uid
    TrieNode.text
    TrieNode.isAnswer
    TrieNode.isEnd
    TrieNode.isRoot
    TrieNode.nodes {
      uid
      TrieNode.text
      TrieNode.isAnswer
    }
  }
}"#;

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct RootsData {
    #[serde(default)]
    roots: Vec<TrieNode>,
}

#[derive(Debug, Default, Deserialize)]
struct WordsData {
    #[serde(default)]
    words: Vec<TrieNode>,
}

#[derive(Debug, Serialize)]
struct MutationRequest<'a> {
    set: [&'a TrieNode; 1],
}

/// Dgraph-backed answer store
pub struct GraphAnswerStore {
    client: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl GraphAnswerStore {
    /// Create a new store (endpoint and API key loaded from environment if
    /// not provided)
    pub fn new(endpoint: Option<String>, api_key: Option<String>) -> Self {
        let endpoint = endpoint.or_else(|| std::env::var("DGRAPH_ENDPOINT").ok());
        let api_key = api_key.or_else(|| std::env::var("DGRAPH_API_KEY").ok());

        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    fn endpoint(&self) -> Result<&str> {
        self.endpoint
            .as_deref()
            .ok_or_else(|| Error::ProviderNotConfigured("Dgraph endpoint not set".to_string()))
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let url = format!("{}/{}", self.endpoint()?.trim_end_matches('/'), path);

        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header("X-Auth-Token", key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::AnswerStore(format!(
                "graph request failed: {} - {}",
                status, error_text
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_root(&self) -> Result<TrieNode> {
        let request = QueryRequest {
            query: ROOT_QUERY,
            variables: None,
        };
        let response: QueryResponse<RootsData> = self.post("query", &request).await?;

        let root = response
            .data
            .roots
            .into_iter()
            .next()
            .ok_or_else(|| Error::AnswerStore("question trie has no root node".to_string()))?;
        let uid = root
            .uid
            .ok_or_else(|| Error::AnswerStore("root node has no uid".to_string()))?;

        self.fetch_node(&uid).await
    }

    /// Fetch a node with its flags and one level of children
    async fn fetch_node(&self, uid: &str) -> Result<TrieNode> {
        let request = QueryRequest {
            query: NODE_QUERY,
            variables: Some(serde_json::json!({ "$a": uid })),
        };
        let response: QueryResponse<WordsData> = self.post("query", &request).await?;

        response
            .data
            .words
            .into_iter()
            .next()
            .ok_or_else(|| Error::AnswerStore(format!("trie node {uid} not found")))
    }

    async fn descend(&self, node: &TrieNode, word: &str) -> Result<Option<TrieNode>> {
        match node.child_matching(word) {
            Some(child) => {
                let uid = child
                    .uid
                    .clone()
                    .ok_or_else(|| Error::AnswerStore("trie child has no uid".to_string()))?;
                Ok(Some(self.fetch_node(&uid).await?))
            }
            None => Ok(None),
        }
    }

    async fn mutate(&self, node: &TrieNode) -> Result<()> {
        let request = MutationRequest { set: [node] };
        let _: serde_json::Value = self.post("mutate?commitNow=true", &request).await?;
        Ok(())
    }
}

#[async_trait]
impl AnswerStore for GraphAnswerStore {
    async fn answer_for(&self, question: &str) -> Result<String> {
        let question = normalize(question);
        let mut node = self.fetch_root().await?;

        // words without a matching child are skipped rather than aborting
        // the walk, so a stray recognition artifact does not sink the lookup
        for word in question.split_whitespace() {
            if let Some(next) = self.descend(&node, word).await? {
                node = next;
            }
        }

        if node.is_end {
            if let Some(answer) = node.answer_child() {
                debug!(answer = %answer.text, "found stored answer");
                return Ok(answer.text.clone());
            }
            warn!("end node without an answer child");
        }

        Ok(FALLBACK_ANSWER.to_string())
    }

    async fn add_answer(&self, question: &str, answer: &str) -> Result<()> {
        let question = normalize(question);
        let words: Vec<&str> = question.split_whitespace().collect();

        let mut node = self.fetch_root().await?;
        let mut matched = 0;

        while matched < words.len() {
            match self.descend(&node, words[matched]).await? {
                Some(next) => {
                    node = next;
                    matched += 1;
                }
                None => break,
            }
        }

        if matched == words.len() {
            debug!("question already stored, leaving trie untouched");
            return Ok(());
        }

        // graft the unmatched suffix plus the answer leaf onto the deepest
        // matching node
        let mut parent = node;
        parent.nodes = vec![build_suffix(&words[matched..], answer)];
        self.mutate(&parent).await
    }
}
