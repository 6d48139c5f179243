mod pattern_parser_tests;

/// Shared fixture covering every tag family the extractors recognize
pub(crate) const SAMPLE_PAGE: &str = r#"<html><head><title> Example Page </title>
<meta charset="utf-8">
<meta name="description" content="A sample page">
<meta name="keywords" content="sample, test">
<meta name="viewport" content="width=device-width">
<style>p { color: red; }</style>
<script>var x = "<p>hidden</p>";</script>
</head><body>
<h1 class="hero">Welcome Home</h1>
<h2>Sub</h2>
<p id="intro" style="margin: 0">Intro paragraph</p>
<div>Box text</div>
<a href="/about">About us</a>
<img src="/logo.png" alt="Logo">
<ul class="nav"><li>One</li><li>Two items</li></ul>
<p>Nested <b>bold</b> text</p>
</body></html>"#;
