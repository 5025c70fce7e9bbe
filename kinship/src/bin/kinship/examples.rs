use crate::commands::{auth, feed, groups, profile, stories};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "login",
            groups: auth::EXAMPLES,
        },
        CommandExample {
            name: "feed",
            groups: feed::FEED_EXAMPLES,
        },
        CommandExample {
            name: "like",
            groups: feed::LIKE_EXAMPLES,
        },
        CommandExample {
            name: "save",
            groups: feed::LIKE_EXAMPLES,
        },
        CommandExample {
            name: "comment",
            groups: feed::LIKE_EXAMPLES,
        },
        CommandExample {
            name: "post",
            groups: feed::POST_EXAMPLES,
        },
        CommandExample {
            name: "groups",
            groups: groups::EXAMPLES,
        },
        CommandExample {
            name: "join",
            groups: groups::EXAMPLES,
        },
        CommandExample {
            name: "leave",
            groups: groups::EXAMPLES,
        },
        CommandExample {
            name: "stories",
            groups: stories::EXAMPLES,
        },
        CommandExample {
            name: "profile",
            groups: profile::EXAMPLES,
        },
    ]
}
