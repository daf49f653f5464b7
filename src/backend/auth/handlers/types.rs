/**
 * Registration Handler Types
 *
 * Request fields are optional at the type level so that a missing field is
 * reported as a 400 with a JSON body instead of an extractor rejection.
 */

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    /// Plain password, hashed before storage
    pub password: Option<String>,
}

/// Registration response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterResponse {
    pub message: String,
    /// Numeric id used as `user_id` by the document endpoints
    pub user_id: i64,
    pub public_id: String,
}
