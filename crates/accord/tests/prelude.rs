//! The prelude is enough to declare, serve and call an endpoint.

use accord::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Rename {
    name: String,
}

/// `PATCH /team/{team}/member/{member}`
#[derive(Debug, Clone, Default)]
struct RenameMember {
    team: String,
    member: u32,
    rename: Rename,
}

impl Endpoint for RenameMember {
    type Query = NoBody;
    type Body = Rename;
    type Response = NoBody;
    const ROLE: Role = Role::Patch;

    fn path() -> PathTemplate<Self> {
        PathTemplate::<Self>::new()
            .literal("team")
            .param("team", |e| &e.team, |e, v| e.team = v)
            .literal("member")
            .param("member", |e| &e.member, |e, v| e.member = v)
    }

    fn query(&self) -> NoBody {
        NoBody
    }

    fn set_query(&mut self, _: NoBody) {}

    fn body(&self) -> Rename {
        self.rename.clone()
    }

    fn set_body(&mut self, body: Rename) {
        self.rename = body;
    }
}

#[test]
fn test_descriptor_and_request() {
    let descriptor = Descriptor::<RenameMember>::resolve().unwrap();
    assert_eq!(descriptor.method(), Method::Patch);
    assert_eq!(descriptor.pattern(), "/team/{team}/member/{member}");

    let endpoint = RenameMember {
        team: "red team".to_string(),
        member: 4,
        rename: Rename {
            name: "Ada".to_string(),
        },
    };
    let base: http::Uri = "http://teams.local/api/".parse().unwrap();
    let request = build_request(&descriptor, &endpoint, &base).unwrap();

    assert_eq!(request.method(), http::Method::PATCH);
    assert_eq!(request.uri(), "http://teams.local/api/team/red%20team/member/4");
    assert_eq!(
        request.headers()[http::header::CONTENT_TYPE],
        JSON_CONTENT_TYPE
    );
    assert!(request.headers().get(http::header::ACCEPT).is_none());
    assert_eq!(request.body().as_ref(), br#"{"name":"Ada"}"#);
}

#[test]
fn test_routes_serve_what_the_client_builds() {
    let routes = Routes::new()
        .endpoint(|req: RenameMember| async move {
            if req.team == "red team" && req.member == 4 && req.rename.name == "Ada" {
                Ok(NoBody)
            } else {
                Err(format!("unexpected {req:?}"))
            }
        })
        .unwrap();

    let descriptor = Descriptor::<RenameMember>::resolve().unwrap();
    let endpoint = RenameMember {
        team: "red team".to_string(),
        member: 4,
        rename: Rename {
            name: "Ada".to_string(),
        },
    };
    let request = build_request(&descriptor, &endpoint, &"http://teams.local/".parse().unwrap())
        .unwrap();

    let response = tokio_test::block_on(routes.dispatch(request)).unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);
}
