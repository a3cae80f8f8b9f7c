//! Mapping between HTTP requests and WebAC modes.

use http::{HeaderValue, Method, Uri};
use webac_acl::{Mode, ModeSet};
use webac_core::ResourceRef;

const READ_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::OPTIONS];
const WRITE_METHODS: [Method; 3] = [Method::PUT, Method::PATCH, Method::DELETE];

/// The modes a request method needs, `None` for methods outside WebAC.
///
/// Requests against an ACL resource need Control whatever the method; the
/// authorizer applies that rule.
pub fn required_modes(method: &Method) -> Option<ModeSet> {
    let mode = match *method {
        Method::GET | Method::HEAD | Method::OPTIONS => Mode::Read,
        Method::PUT | Method::PATCH | Method::DELETE => Mode::Write,
        Method::POST => Mode::Append,
        _ => return None,
    };
    Some(ModeSet::from(mode))
}

/// Methods permitted by `modes` on a resource.
pub fn allowed_methods(modes: ModeSet, is_acl: bool) -> Vec<Method> {
    if is_acl {
        return if modes.contains(Mode::Control) {
            READ_METHODS.into_iter().chain(WRITE_METHODS).collect()
        } else {
            Vec::new()
        };
    }

    let mut methods = Vec::new();
    if modes.contains(Mode::Read) {
        methods.extend(READ_METHODS);
    }
    if modes.contains(Mode::Append) {
        methods.push(Method::POST);
    }
    if modes.contains(Mode::Write) {
        methods.extend(WRITE_METHODS);
    }
    methods
}

/// An `Allow` header value for `modes`, `None` if nothing is permitted.
pub fn allow_header(modes: ModeSet, is_acl: bool) -> Option<HeaderValue> {
    let methods = allowed_methods(modes, is_acl);
    if methods.is_empty() {
        return None;
    }
    let joined = methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    HeaderValue::from_str(&joined).ok()
}

/// The resource a request addresses.
///
/// The request path is resolved against `base_url`; an `ext=acl` query
/// parameter selects the resource's ACL.
pub fn target_from_uri(base_url: &str, uri: &Uri) -> ResourceRef {
    let resource = ResourceRef::new(format!("{}{}", base_url.trim_end_matches('/'), uri.path()));
    let wants_acl = uri
        .query()
        .is_some_and(|query| query.split('&').any(|pair| pair == "ext=acl"));
    if wants_acl {
        resource.acl()
    } else {
        resource
    }
}
