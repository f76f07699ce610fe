//! 文本缓冲区模型
//!
//! 职责：
//! - 文本存储（Rope）
//! - 主光标与多选区管理
//! - 行列 ↔ 字符偏移映射

use super::selection::Selection;
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::io::{self, Write};
use unicode_segmentation::UnicodeSegmentation;

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// `selections` 为空时表示只有主光标这一个插入点。
#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: (usize, usize),
    selections: Vec<Selection>,
    cached_char_pos: Option<usize>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: (0, 0),
            selections: Vec::new(),
            cached_char_pos: Some(0),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: (0, 0),
            selections: Vec::new(),
            cached_char_pos: Some(0),
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// 流式写入到 Writer，避免大文件 OOM
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for chunk in self.rope.chunks() {
            writer.write_all(chunk.as_bytes())?;
        }
        Ok(())
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// 设置光标，越界时夹到最近的合法位置
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.len_lines().saturating_sub(1));
        let col = col.min(self.line_grapheme_len(row));
        self.cursor = (row, col);
        self.selections.clear();
        self.invalidate_char_pos_cache();
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// 替换整个选区集合；主光标跟随最后一个选区
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        if let Some(last) = selections.last() {
            self.cursor = last.cursor();
            self.invalidate_char_pos_cache();
        }
        self.selections = selections;
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    pub fn has_selection(&self) -> bool {
        self.selections.iter().any(|s| !s.is_empty())
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_slice(&self, row: usize) -> Option<RopeSlice<'_>> {
        if row < self.rope.len_lines() {
            Some(self.rope.line(row))
        } else {
            None
        }
    }

    pub fn cursor_char_offset(&mut self) -> usize {
        match self.cached_char_pos {
            Some(offset) => offset,
            None => {
                let offset = self.pos_to_char(self.cursor);
                self.cached_char_pos = Some(offset);
                offset
            }
        }
    }

    pub fn pos_to_char(&self, pos: (usize, usize)) -> usize {
        let row = pos.0.min(self.len_lines().saturating_sub(1));
        self.rope.line_to_char(row) + self.grapheme_to_char_index(row, pos.1)
    }

    pub fn char_to_pos(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());
        let row = self.rope.char_to_line(char_offset);
        let line_start = self.rope.line_to_char(row);
        let prefix = slice_to_cow(self.rope.slice(line_start..char_offset));
        (row, prefix.graphemes(true).count())
    }

    pub fn grapheme_to_char_index(&self, row: usize, grapheme_index: usize) -> usize {
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        line.graphemes(true)
            .take(grapheme_index)
            .map(|g| g.chars().count())
            .sum()
    }

    pub fn line_grapheme_len(&self, row: usize) -> usize {
        if row >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        let without_newline = line.strip_suffix('\n').unwrap_or(&line);
        let without_newline = without_newline
            .strip_suffix('\r')
            .unwrap_or(without_newline);
        without_newline.graphemes(true).count()
    }

    // ==================== 编辑 ====================

    /// 在指定字符偏移插入文本，光标移到插入文本末尾，返回末尾偏移
    pub fn insert_at(&mut self, char_offset: usize, text: &str) -> usize {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);

        let end = char_offset + text.chars().count();
        self.selections.clear();
        self.cursor = self.char_to_pos(end);
        self.cached_char_pos = Some(end);
        end
    }

    /// 在所有选区（无选区时为主光标）处输入文本，选区内容被替换
    pub fn replace_selections(&mut self, text: &str) {
        let ranges = self.edit_ranges(|_, offset| (offset, offset));
        self.apply_edits(ranges, text);
    }

    /// Backspace：非空选区删除内容，空选区删除前一个 grapheme
    pub fn delete_backward(&mut self) {
        let ranges = self.edit_ranges(|buffer, offset| {
            if offset == 0 {
                return (0, 0);
            }
            let (row, col) = buffer.char_to_pos(offset);
            let prev = if col > 0 {
                buffer.pos_to_char((row, col - 1))
            } else {
                offset - 1
            };
            (prev, offset)
        });
        self.apply_edits(ranges, "");
    }

    fn edit_ranges(
        &mut self,
        on_caret: impl Fn(&Self, usize) -> (usize, usize),
    ) -> Vec<(usize, usize)> {
        if self.selections.is_empty() {
            let offset = self.cursor_char_offset();
            return vec![on_caret(self, offset)];
        }

        let this: &Self = self;
        this.selections
            .iter()
            .map(|sel| {
                let (start, end) = sel.range();
                let start = this.pos_to_char(start);
                let end = this.pos_to_char(end);
                if start == end {
                    on_caret(this, start)
                } else {
                    (start, end)
                }
            })
            .collect()
    }

    /// 从后向前应用编辑，避免前面的编辑使后面的偏移失效
    fn apply_edits(&mut self, mut ranges: Vec<(usize, usize)>, text: &str) {
        ranges.sort_unstable();
        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            match merged.last_mut() {
                Some(last) if start <= last.1 && (start < last.1 || start == last.0) => {
                    last.1 = last.1.max(end);
                }
                _ => merged.push((start, end)),
            }
        }

        let inserted = text.chars().count();
        for &(start, end) in merged.iter().rev() {
            if end > start {
                self.rope.remove(start..end);
            }
            if !text.is_empty() {
                self.rope.insert(start, text);
            }
        }

        let mut shift = 0isize;
        let carets: Vec<usize> = merged
            .iter()
            .map(|&(start, end)| {
                let caret = (start as isize + shift) as usize + inserted;
                shift += inserted as isize - (end - start) as isize;
                caret
            })
            .collect();

        let had_multiple = self.selections.len() > 1;
        self.invalidate_char_pos_cache();
        match carets.last() {
            Some(&last) if had_multiple => {
                let selections = carets
                    .iter()
                    .map(|&offset| Selection::caret(self.char_to_pos(offset)))
                    .collect();
                self.set_selections(selections);
                self.cached_char_pos = Some(last);
            }
            Some(&last) => {
                self.selections.clear();
                self.cursor = self.char_to_pos(last);
                self.cached_char_pos = Some(last);
            }
            None => {}
        }
    }

    // ==================== 光标移动 ====================

    pub fn move_left(&mut self) {
        let (row, col) = self.cursor;
        if col > 0 {
            self.set_cursor(row, col - 1);
        } else if row > 0 {
            self.set_cursor(row - 1, self.line_grapheme_len(row - 1));
        } else {
            self.set_cursor(row, col);
        }
    }

    pub fn move_right(&mut self) {
        let (row, col) = self.cursor;
        if col < self.line_grapheme_len(row) {
            self.set_cursor(row, col + 1);
        } else if row + 1 < self.len_lines() {
            self.set_cursor(row + 1, 0);
        } else {
            self.set_cursor(row, col);
        }
    }

    pub fn move_up(&mut self) {
        let (row, col) = self.cursor;
        self.set_cursor(row.saturating_sub(1), col);
    }

    pub fn move_down(&mut self) {
        let (row, col) = self.cursor;
        self.set_cursor(row + 1, col);
    }

    pub fn move_line_start(&mut self) {
        self.set_cursor(self.cursor.0, 0);
    }

    pub fn move_line_end(&mut self) {
        let row = self.cursor.0;
        self.set_cursor(row, self.line_grapheme_len(row));
    }

    fn invalidate_char_pos_cache(&mut self) {
        self.cached_char_pos = None;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
