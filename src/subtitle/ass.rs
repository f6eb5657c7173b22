// ASS document assembly
use super::timecode::format_timecode;
use super::DialogueLine;

/// Fixed script header: script info, a single `Default` style and the events
/// format line, followed by the blank separator line.
pub const HEADER: &[&str] = &[
    "[Script Info]",
    "ScriptType: v4.00+",
    "PlayResX: 1920",
    "PlayResY: 1080",
    "WrapStyle: 0",
    "",
    "[V4+ Styles]",
    "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding",
    "Style: Default,Arial,48,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,2,10,10,10,1",
    "",
    "[Events]",
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text",
    "",
];

/// Render one event on layer 0 with the `Default` style, zero margins and no
/// effect. Only the times and text come from the source line.
pub fn render_dialogue(line: &DialogueLine) -> String {
    format!(
        "Dialogue: 0,{},{},Default,,0,0,0,,{}",
        format_timecode(line.start),
        format_timecode(line.end),
        line.text
    )
}

/// Build the full document: header, then every line in the given order.
/// Lines are separated by `\n` and the document has no trailing newline.
pub fn assemble(lines: &[DialogueLine]) -> String {
    HEADER
        .iter()
        .map(|h| h.to_string())
        .chain(lines.iter().map(render_dialogue))
        .collect::<Vec<_>>()
        .join("\n")
}
