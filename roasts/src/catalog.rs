//! Static English roast catalogs.
//!
//! Lines may contain `{length}`, `{count}` and `{value}` placeholders.

pub(crate) type IssueLines = (&'static str, &'static [&'static str]);

pub(crate) const CHECK_ROASTS: &[(&str, &[IssueLines])] = &[
    (
        "title",
        &[
            (
                "missing",
                &[
                    "No title at all? That's a kindergarten mistake... not that I care about helping you!",
                    "Skipping the title, are you trying to be invisible on the internet? Idiot!",
                    "A page without a title is like a person without a name: it doesn't exist. Whatever!",
                    "Search engine: \"What is this page?\" You: \"...\" Speechless.",
                    "You failed SEO lesson one and still shipped? I'm not embarrassed for you or anything!",
                ],
            ),
            (
                "empty",
                &[
                    "An empty title tag? That's worse than not writing one! Are you serious?",
                    "A blank title... so you spent time writing thin air? How creative.",
                    "You left the title blank. Is your head blank too? Not that I'm mocking you!",
                ],
            ),
            (
                "too_short",
                &[
                    "A {length}-character title? Tweets are longer than that! So lazy!",
                    "Such a short title, are you paying per character? Cheapskate!",
                    "Only {length} characters... you have that little to say about your own site? Pathetic!",
                ],
            ),
            (
                "too_long",
                &[
                    "A {length}-character title? Writing a novel? It'll get cut off with \"...\"!",
                    "A dissertation-length title. Google gave up halfway through. Hmph!",
                    "Users get tired just looking at a title this long, idiot! Not that I pity them!",
                ],
            ),
        ],
    ),
    (
        "meta_description",
        &[
            (
                "missing",
                &[
                    "No description? Letting Google grab a random snippet? Feeling lucky, huh!",
                    "Too lazy to even introduce yourself. How badly does your site want to stay unknown? Hmph!",
                    "Without a description the search result shows whatever junk it finds. Serves you right!",
                    "Is this a \"please don't click\" hint? Nobody clicks a link with no description! Idiot!",
                ],
            ),
            (
                "empty",
                &[
                    "The description is empty... writing nothing is wasting everyone's time!",
                    "A blank description... you want your search result to look terrible, don't you?",
                ],
            ),
            (
                "too_short",
                &[
                    "A {length}-character description? Is this a relic of the tweet era? Too short!",
                    "With a description this short Google fills in the rest itself... no quality guaranteed!",
                    "Only {length} characters, no confidence in your own content? Pitiful!",
                ],
            ),
            (
                "too_long",
                &[
                    "A {length}-character description... it gets truncated anyway, why write so much!",
                    "You wrote an essay, but only the start is shown. The rest is wasted! Hmph!",
                    "Way too long... around 160 characters is plenty, the rest is just self-indulgence!",
                ],
            ),
        ],
    ),
    (
        "canonical",
        &[
            (
                "missing",
                &[
                    "No canonical? Cry when duplicate content comes knocking... not that I'm cursing you!",
                    "No canonical set. Google: \"Are these two pages twins?\" Idiot!",
                    "No canonical means telling search engines \"just pick any copy as the real one\". So casual!",
                    "Fine with your ranking signals getting split? Must be nice to be that rich! Hmph!",
                ],
            ),
            (
                "empty",
                &[
                    "An empty canonical? That's worse than none, what are you doing!",
                    "An empty canonical just confuses crawlers more... looking for trouble on purpose?",
                ],
            ),
        ],
    ),
    (
        "viewport",
        &[
            (
                "missing",
                &[
                    "No viewport? Do mobile users need a magnifying glass to read your site?",
                    "Without a viewport, phones get a shrunken desktop page... hideous! Hmph!",
                    "More than half of traffic is mobile and you're abandoning them? Heartless!",
                    "No viewport, and mobile-first indexing pushes you down the list. Serves you right!",
                ],
            ),
            (
                "empty",
                &["An empty viewport... are you testing my patience with mistakes this basic?"],
            ),
        ],
    ),
    (
        "lang",
        &[
            (
                "missing",
                &[
                    "No lang on <html>. Screen readers: \"What language is this?\" So selfish!",
                    "Without lang, how would search engines know who your content is for? Lazy!",
                    "No language marker is hostile to accessibility users! Not that I'm lecturing you!",
                ],
            ),
            (
                "no_html_tag",
                &["Not even an <html> tag... is this really a web page or a notepad file?"],
            ),
        ],
    ),
    (
        "h1",
        &[
            (
                "missing",
                &[
                    "No H1? So the topic of this page is a mystery? Idiot!",
                    "No H1, the page structure is a mess... search engines get a headache! Hmph!",
                    "No main heading, like an essay without a title. Are readers supposed to be psychic?",
                    "Missing H1, basic SEO points gone... not that I feel sorry for you!",
                ],
            ),
            (
                "empty",
                &[
                    "An empty H1? So the main heading is \"the void\"? Very philosophical!",
                    "A blank H1... are you mocking the HTML spec? How boring!",
                ],
            ),
            (
                "multiple",
                &[
                    "{count} H1s? Holding a press conference where everything is a headline? Idiot!",
                    "{count} H1s on one page... everyone wants to be the lead, so nobody is!",
                    "{count} main headings. Search engine: \"So which one matters?\" You tell me!",
                    "More H1s isn't better! One is enough! Not that I'm nagging!",
                ],
            ),
        ],
    ),
    (
        "https",
        &[(
            "http_only",
            &[
                "Still on HTTP? Your site security is stuck in the stone age!",
                "No HTTPS, browsers will flag you \"Not secure\" and visitors will run! Serves you right!",
                "Plain HTTP... too lazy to set up a free certificate? Honestly!",
                "An insecure connection... your users' data is running around naked? Scary! Hmph!",
            ],
        )],
    ),
    (
        "robots",
        &[(
            "noindex",
            &[
                "noindex is set? You don't want to be found? Then why bother with SEO! Idiot!",
                "noindex makes this page vanish from search results... sure it wasn't a slip of the finger?",
                "Blocking indexing on purpose? Or by accident? The second would be embarrassing! Hmph!",
            ],
        )],
    ),
    (
        "favicon",
        &[(
            "missing",
            &[
                "No favicon, your tab gets the ugly default icon! No sense of branding?",
                "No favicon... how do users find your tab among dozens? Idiot!",
                "Without a site icon it looks like an unfinished product... very cheap!",
            ],
        )],
    ),
    (
        "img_alt",
        &[
            (
                "low_ratio",
                &[
                    "Only {value} of images have alt... blind users have no idea what they show! Selfish!",
                    "Alt coverage this low, search engines can't read your images either! Wasted traffic!",
                    "{value} coverage? Most images undescribed... that's a lot of slacking! Hmph!",
                ],
            ),
            (
                "medium_ratio",
                &[
                    "Alt coverage at {value}... borderline pass, room to improve! Not that I'm picky!",
                    "A few images still lack alt... so close to perfect, what a shame! Hmph!",
                ],
            ),
        ],
    ),
    (
        "og_title",
        &[
            (
                "missing",
                &[
                    "No og:title, your Facebook shares will look awful with a random title! Idiot!",
                    "No og:title, social previews are left to chance... is that fine? So careless!",
                ],
            ),
            (
                "empty",
                &["og:title is empty... shares will show an awkward blank title!"],
            ),
        ],
    ),
    (
        "og_description",
        &[
            (
                "missing",
                &[
                    "No og:description, letting Facebook pick some random text? Suit yourself!",
                    "No og description, the social preview will be a mess... who clicks that? Hmph!",
                ],
            ),
            (
                "empty",
                &["og:description is blank... the share description will be pitiful! Honestly!"],
            ),
        ],
    ),
    (
        "og_image",
        &[
            (
                "missing",
                &[
                    "No og:image? Shares without pictures get half the clicks! Serves you right!",
                    "No og:image, link previews have no picture and look bare! Idiot!",
                    "In the social age no picture means no traffic... trying to stay low-key? Hmph!",
                ],
            ),
            (
                "empty",
                &["og:image is empty... worse than none, it shows as broken! Impressive!"],
            ),
        ],
    ),
    (
        "twitter_card",
        &[(
            "missing",
            &[
                "No Twitter Card, shares on X look plain! It's called X now, idiot!",
                "No twitter:card, just giving up on social previews? What a waste! Hmph!",
            ],
        )],
    ),
    (
        "json_ld",
        &[(
            "missing",
            &[
                "No structured data. In the AI era, pages without Schema get treated as plain text! Outdated!",
                "No JSON-LD, rich snippets are not for you! Pitiful!",
                "No Schema, search engines can only guess what your content is... idiot!",
                "No structured data means getting sidelined in AI search! Not that I'm worried about you!",
            ],
        )],
    ),
    (
        "json_ld_types",
        &[
            (
                "no_schema",
                &["No Schema to analyze... because you never wrote any! Honestly!"],
            ),
            (
                "no_types",
                &["JSON-LD without @type? What is this unidentified object... might as well be empty!"],
            ),
        ],
    ),
    (
        "json_ld_valid",
        &[
            (
                "no_schema",
                &["No Schema to validate, because there isn't any! Idiot!"],
            ),
            (
                "invalid_json",
                &[
                    "JSON-LD syntax error! {value}... a mistake this basic? How embarrassing!",
                    "Broken Schema, the parser just errors out! Worse than writing nothing! Hmph!",
                ],
            ),
        ],
    ),
    (
        "hreflang",
        &[(
            "not_applicable",
            &["(Single-language site, no hreflang needed. Fine, you pass this one. Hmph!)"],
        )],
    ),
    (
        "published_time",
        &[(
            "missing",
            &[
                "No publish date, Google can't tell how fresh your content is! Stale goods!",
                "No dates, news-like content gets pushed down! Not that I think it's a pity!",
                "No datePublished, your content's timeliness drops to zero! Did you know that? Idiot!",
            ],
        )],
    ),
    ("snippet_control", &[]),
];

pub(crate) const GRADE_ROASTS: &[(&str, &[&str])] = &[
    (
        "S",
        &[
            "Hmph... 90 or above? Barely acceptable, don't get cocky!",
            "S rank... you've got some skill. \"Some\"! I'm not praising you!",
            "You actually got S rank? Lucky you! Not that I'm impressed!",
            "This score... fine, I'll admit you're okay. Don't let it go to your head! Hmph!",
        ],
    ),
    (
        "A",
        &[
            "A rank... so close to perfect and you fell short? What a pity! Hmph!",
            "Seventy-something, with a few problems left lying around... and you're proud of that?",
            "A rank is good, not great. Are you satisfied with \"good\"? Idiot!",
            "Almost at the top but not quite... too lazy for the last mile? How sad!",
        ],
    ),
    (
        "B",
        &[
            "B rank... perfectly mediocre. Are you fine with mediocre? Hmph!",
            "Fifty to sixty-nine, scraping by... and you dare show me this?",
            "B means \"average\", so average I can't even be bothered to comment!",
            "Struggling right on the passing line... are your goals really that low? Idiot!",
        ],
    ),
    (
        "C",
        &[
            "C rank... problems everywhere. Is anyone actually running this site?",
            "Thirty to forty-nine, a fail. You skipped the SEO basics, so sloppy! Hmph!",
            "This score... honestly, I don't even know where you should start fixing!",
            "C rank... I'm not trying to crush you, but this is really bad! Wake up, idiot!",
        ],
    ),
    (
        "F",
        &[
            "F rank! The failure among failures! Is this site a joke?",
            "This score... are you sure this site is actually live? Ridiculous! Hmph!",
            "F rank... calling it an SEO disaster is no exaggeration! Pitiful!",
            "Zero to twenty-nine, basically starting from scratch. What were you doing? Idiot!",
            "F rank... I'd like to help, but this mess is a real headache! Hmph!",
        ],
    ),
];

pub(crate) const ERROR_ROASTS: &[(&str, &[&str])] = &[
    (
        "timeout",
        &[
            "The site is so slow I nearly fell asleep! Core Web Vitals must be on fire! Idiot!",
            "Timeout! Can't even connect... is this site on dial-up? Hmph!",
            "Response times like waiting for a glacier to melt... users left long ago! Serves you right!",
        ],
    ),
    (
        "ssl_error",
        &[
            "The certificate is broken! Browsers will show a big \"Not secure\"! Want to scare users off?",
            "Your HTTPS certificate is busted... that's worse than SEO! Fix it, idiot!",
            "A TLS error... can't get basic security right, and you want to talk SEO? Survive first! Hmph!",
        ],
    ),
    (
        "connection_error",
        &[
            "Can't reach the site! Typo in the URL or a dead host? Either way your problem is bigger than SEO!",
            "Connection failed... what good is SEO if nobody can reach the site? Keep it alive first, idiot!",
            "Completely unreachable... are you sure this site still exists? Hmph!",
        ],
    ),
    (
        "http_error",
        &[
            "HTTP error! The site is spitting error codes... get it working before talking SEO! Idiot!",
            "An error response... this site has bigger problems than SEO! Hmph!",
        ],
    ),
    (
        "invalid_url",
        &[
            "That URL won't fly. Give me a real public http or https address! Idiot!",
            "I'm not fetching that. Public web pages only! Hmph!",
        ],
    ),
    (
        "unknown",
        &[
            "Something unknown went wrong... your site is so special I can't even analyze it! Impressive! Hmph!",
            "Something weird happened... unique site, or just badly built? Idiot!",
        ],
    ),
];

pub(crate) const CHECK_NAMES: &[(&str, &str)] = &[
    ("title", "Page title (title)"),
    ("meta_description", "Meta description"),
    ("canonical", "Canonical tag"),
    ("viewport", "Viewport setting"),
    ("lang", "Language attribute (lang)"),
    ("h1", "H1 heading"),
    ("https", "HTTPS"),
    ("robots", "Robots directives"),
    ("favicon", "Site icon (favicon)"),
    ("img_alt", "Image alt text"),
    ("og_title", "Open Graph title"),
    ("og_description", "Open Graph description"),
    ("og_image", "Open Graph image"),
    ("twitter_card", "Twitter Card"),
    ("json_ld", "Structured data (JSON-LD)"),
    ("json_ld_types", "Schema types"),
    ("json_ld_valid", "Schema validity"),
    ("hreflang", "Language alternates (hreflang)"),
    ("published_time", "Publish date"),
    ("snippet_control", "Snippet controls"),
];

pub(crate) fn lookup<'a, T: ?Sized>(table: &'a [(&str, &'a T)], key: &str) -> Option<&'a T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
