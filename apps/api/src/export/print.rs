//! Print export. Wraps the assembled sections in a standalone, minimally styled
//! HTML page. When `auto_print` is set the page opens the browser print dialog
//! on load.

use handlebars::Handlebars;
use serde::Serialize;

use crate::export::ExportError;
use crate::preview::assembler::{
    EducationEntryBlock, HeaderBlock, RenderableSection, WorkEntryBlock,
};

const TEMPLATE_NAME: &str = "print";

const PRINT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{{title}}</title>
    <style>
      body {
        font-family: Arial, sans-serif;
        line-height: 1.6;
        color: #333;
        max-width: 800px;
        margin: 0 auto;
        padding: 20px;
      }
      h1, h2, h3 {
        color: #111;
      }
      .contact-info {
        text-align: center;
        font-size: 14px;
      }
      .entry-header {
        display: flex;
        justify-content: space-between;
      }
      .skills span {
        display: inline-block;
        margin: 0 8px 4px 0;
      }
      ul {
        margin-top: 5px;
        padding-left: 20px;
      }
    </style>
  </head>
  <body>
{{#each sections}}
{{#if header}}
    <div class="contact-info">
      <h1>{{header.name}}</h1>
      {{#if header.email}}<div>{{header.email}}</div>{{/if}}
      {{#if header.contact_line}}<div>{{#each header.contact_line}}<span>{{this}}</span>{{#unless @last}} &nbsp; {{/unless}}{{/each}}</div>{{/if}}
    </div>
{{/if}}
{{#if title}}
    <h2>{{title}}</h2>
{{/if}}
{{#if summary}}
    <p>{{summary}}</p>
{{/if}}
{{#each work}}
    <div class="entry">
      {{#if header}}
      <div class="entry-header">
        <div>
          {{#if header.position}}<div><strong>{{header.position}}</strong></div>{{/if}}
          {{#if header.company}}<div>{{header.company}}</div>{{/if}}
        </div>
        {{#if header.date_range}}<div>{{header.date_range}}</div>{{/if}}
      </div>
      {{/if}}
      {{#if description}}<p>{{description}}</p>{{/if}}
      {{#if achievements}}
      <ul>
        {{#each achievements}}<li>{{this}}</li>{{/each}}
      </ul>
      {{/if}}
    </div>
{{/each}}
{{#each education}}
    <div class="entry">
      {{#if header}}
      <div class="entry-header">
        <div>
          {{#each header.credentials}}<div><strong>{{this}}</strong></div>{{/each}}
          {{#if header.institution}}<div>{{header.institution}}</div>{{/if}}
        </div>
        {{#if header.graduation_date}}<div>{{header.graduation_date}}</div>{{/if}}
      </div>
      {{/if}}
      {{#if description}}<p>{{description}}</p>{{/if}}
    </div>
{{/each}}
{{#if skills}}
    <div class="skills">{{#each skills}}<span>{{this}}</span>{{/each}}</div>
{{/if}}
{{/each}}
{{#if auto_print}}
    <script>
      window.addEventListener("load", function () {
        window.focus();
        window.print();
      });
    </script>
{{/if}}
  </body>
</html>
"#;

#[derive(Serialize)]
struct PrintPage<'a> {
    title: &'a str,
    auto_print: bool,
    sections: Vec<PrintSection<'a>>,
}

/// Flattened view of one section; exactly one payload field is set.
#[derive(Serialize, Default)]
struct PrintSection<'a> {
    title: Option<&'static str>,
    header: Option<&'a HeaderBlock>,
    summary: Option<&'a str>,
    work: &'a [WorkEntryBlock],
    education: &'a [EducationEntryBlock],
    skills: &'a [String],
}

impl<'a> From<&'a RenderableSection> for PrintSection<'a> {
    fn from(section: &'a RenderableSection) -> Self {
        let base = PrintSection {
            title: section.title(),
            ..PrintSection::default()
        };
        match section {
            RenderableSection::Header(header) => PrintSection {
                header: Some(header),
                ..base
            },
            RenderableSection::Summary(text) => PrintSection {
                summary: Some(text.as_str()),
                ..base
            },
            RenderableSection::WorkExperience(entries) => PrintSection {
                work: entries.as_slice(),
                ..base
            },
            RenderableSection::Education(entries) => PrintSection {
                education: entries.as_slice(),
                ..base
            },
            RenderableSection::Skills(skills) => PrintSection {
                skills: skills.as_slice(),
                ..base
            },
        }
    }
}

pub struct PrintRenderer {
    engine: Handlebars<'static>,
}

impl PrintRenderer {
    pub fn new() -> Result<Self, ExportError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(false);
        engine
            .register_template_string(TEMPLATE_NAME, PRINT_TEMPLATE)
            .map_err(|e| ExportError::Template(e.to_string()))?;
        Ok(Self { engine })
    }

    /// Renders a standalone print document. User text is HTML-escaped.
    pub fn render(
        &self,
        title: &str,
        sections: &[RenderableSection],
        auto_print: bool,
    ) -> Result<String, ExportError> {
        let page = PrintPage {
            title,
            auto_print,
            sections: sections.iter().map(PrintSection::from).collect(),
        };
        self.engine
            .render(TEMPLATE_NAME, &page)
            .map_err(|e| ExportError::Template(e.to_string()))
    }
}
