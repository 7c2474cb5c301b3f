// -- Auth --

/// Everything the registration form collects. Only the last three fields end
/// up in the directory; the names are kept by the session for greetings.
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub phone: String,
}

impl RegisterRequest {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// -- Messages --

#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub recipient: String,
    pub body: String,
}
