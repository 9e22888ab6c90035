use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of the root endpoint.
#[derive(Serialize, Debug)]
pub struct Welcome {
    pub message: &'static str,
}

impl Default for Welcome {
    fn default() -> Self {
        Self { message: "Welcome to this fantastic app!" }
    }
}
