//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request line per connection,
//! no headers read, `Connection: close` on every response.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine driving one exchange
//! - **`parser`**: extracts the requested path from the request line
//! - **`resolver`**: maps that path to a file and loads it into a `Resource`
//! - **`store`**: the file store the resolver reads from
//! - **`response`**: status lines and header framing for 200/400/404
//! - **`writer`**: partial-write safe transport writes
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read into the shared request buffer
//!        └──────┬──────┘
//!               │ bytes received (0 bytes → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │    Resolving     │ ← Parse path, load file
//!        └──────┬───────────┘
//!               │ Found / NotFound / Malformed
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← 200, 404 or 400
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Socket dropped, back to accept
//!        └──────────────────┘
//! ```

pub mod connection;
pub mod parser;
pub mod resolver;
pub mod response;
pub mod store;
pub mod writer;
