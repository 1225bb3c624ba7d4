//! Method skeletons for the generated JavaScript client.
//!
//! Skeletons use `@NAME@` markers so the JavaScript braces and template
//! literals can be written as-is.

pub const PATH_MARKER: &str = "@PATH@";
pub const METHOD_MARKER: &str = "@METHOD@";

pub const CLASS_HEADER: &str = r#"
// Auto-generated @CLASS@ client
// Based on captured network traffic analysis

class @CLASS@ {
  constructor() {
    this.baseURL = '@BASE_URL@';
    this.session = null;
    this.headers = {
      'User-Agent': '@USER_AGENT@',
      'Content-Type': 'application/json'
    };
  }

"#;

pub const CLASS_FOOTER: &str = r#"
}

module.exports = @CLASS@;
"#;

#[derive(Debug)]
pub struct MethodTemplate {
    pub name: &'static str,
    /// Any of these in the lower-cased endpoint key selects the template.
    pub keywords: &'static [&'static str],
    /// Also require the recorded HTTP method to be POST.
    pub post_only: bool,
    /// Literal replacements applied to the endpoint path before it is
    /// spliced into the skeleton.
    pub path_params: &'static [(&'static str, &'static str)],
    pub skeleton: &'static str,
}

impl MethodTemplate {
    pub fn applies_to(&self, endpoint_key: &str, http_method: &str) -> bool {
        let key = endpoint_key.to_lowercase();
        let keyword_hit = self.keywords.iter().any(|word| key.contains(word));
        keyword_hit && (!self.post_only || http_method.eq_ignore_ascii_case("post"))
    }

    pub fn render(&self, path: &str, http_method: &str) -> String {
        let path = self
            .path_params
            .iter()
            .fold(path.to_string(), |path, (from, to)| path.replace(from, to));
        // the path goes in last so recorded URLs are never rescanned for markers
        self.skeleton
            .replace(METHOD_MARKER, &http_method.to_uppercase())
            .replace(PATH_MARKER, &path)
    }
}

pub static METHOD_TEMPLATES: [MethodTemplate; 4] = [
    MethodTemplate {
        name: "login",
        keywords: &["login"],
        post_only: false,
        path_params: &[],
        skeleton: r#"
  async login(email, password) {
    const response = await fetch(`${this.baseURL}@PATH@`, {
      method: '@METHOD@',
      headers: this.headers,
      body: JSON.stringify({ email, password })
    });

    const data = await response.json();
    if (data.token || data.session) {
      this.session = data.token || data.session;
      this.headers['Authorization'] = `Bearer ${this.session}`;
    }
    return data;
  }
"#,
    },
    MethodTemplate {
        name: "createBooking",
        keywords: &["booking"],
        post_only: true,
        path_params: &[],
        skeleton: r#"
  async createBooking(outletId, timeSlot) {
    const response = await fetch(`${this.baseURL}@PATH@`, {
      method: 'POST',
      headers: this.headers,
      body: JSON.stringify({ outletId, timeSlot })
    });
    return response.json();
  }
"#,
    },
    MethodTemplate {
        name: "generateQR",
        keywords: &["qr"],
        post_only: false,
        path_params: &[("{id}", "${bookingId}")],
        skeleton: r#"
  async generateQR(bookingId) {
    const response = await fetch(`${this.baseURL}@PATH@`, {
      headers: this.headers
    });
    return response.json();
  }
"#,
    },
    MethodTemplate {
        name: "unlockDoor",
        keywords: &["door", "unlock", "access"],
        post_only: false,
        path_params: &[],
        skeleton: r#"
  async unlockDoor(qrCode, doorId) {
    const response = await fetch(`${this.baseURL}@PATH@`, {
      method: 'POST',
      headers: this.headers,
      body: JSON.stringify({ qrCode, doorId })
    });
    return response.json();
  }
"#,
    },
];
