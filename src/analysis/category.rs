/// Coarse purpose of an endpoint, guessed from its `"<METHOD> <path>"` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointCategory {
    Login,
    Booking,
    QrCode,
    DoorControl,
}

impl EndpointCategory {
    /// Checked in this order; the order is also the order tags are reported in.
    pub const ALL: [EndpointCategory; 4] = [
        EndpointCategory::Login,
        EndpointCategory::Booking,
        EndpointCategory::QrCode,
        EndpointCategory::DoorControl,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            EndpointCategory::Login => &["login"],
            EndpointCategory::Booking => &["booking"],
            EndpointCategory::QrCode => &["qr"],
            EndpointCategory::DoorControl => &["door", "unlock"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EndpointCategory::Login => "LOGIN ENDPOINT FOUND!",
            EndpointCategory::Booking => "BOOKING ENDPOINT FOUND!",
            EndpointCategory::QrCode => "QR CODE ENDPOINT FOUND!",
            EndpointCategory::DoorControl => "DOOR CONTROL ENDPOINT FOUND!",
        }
    }

    pub fn matches(&self, endpoint_key: &str) -> bool {
        let key = endpoint_key.to_lowercase();
        self.keywords().iter().any(|word| key.contains(word))
    }

    /// Every category whose keywords appear in the key. A key can carry
    /// several tags, e.g. `POST /login/qr` is both `Login` and `QrCode`.
    pub fn classify(endpoint_key: &str) -> Vec<EndpointCategory> {
        Self::ALL
            .iter()
            .copied()
            .filter(|category| category.matches(endpoint_key))
            .collect()
    }
}
