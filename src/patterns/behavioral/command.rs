use crate::utils::error::{LabError, Result};
use std::fmt;
use std::io::Write;
use std::ops::Range;

/// The receiver. Holds the text and the current selection.
#[derive(Debug, Default, Clone)]
pub struct Editor {
    text: String,
    selection: Option<Range<usize>>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the whole text and drops any selection.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = None;
    }

    pub fn select(&mut self, range: Range<usize>) -> Result<()> {
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return Err(LabError::validation(format!(
                "Selection {:?} is outside the editor text",
                range
            )));
        }
        self.selection = Some(range);
        Ok(())
    }

    /// The selected slice, or the whole text when nothing is selected.
    pub fn get_selection(&self) -> String {
        match &self.selection {
            Some(range) => self.text[range.clone()].to_string(),
            None => self.text.clone(),
        }
    }

    pub fn delete_selection(&mut self) {
        match self.selection.take() {
            Some(range) => {
                self.text.replace_range(range, "");
            }
            None => self.text.clear(),
        }
    }

    fn append(&mut self, text: &str) {
        self.text.push_str(text);
        self.selection = None;
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Editor(text: '{}')", self.text)
    }
}

/// State the commands operate on: the editor and the application clipboard.
#[derive(Debug, Default)]
pub struct Workspace {
    pub editor: Editor,
    pub clipboard: String,
}

pub trait Command {
    fn name(&self) -> &'static str;

    fn is_undoable(&self) -> bool {
        true
    }

    /// Runs the command. Returns `true` when it must be recorded in the history.
    fn execute(&mut self, workspace: &mut Workspace) -> bool;

    fn undo(&mut self, workspace: &mut Workspace);
}

/// Snapshot of the editor text taken before a command changes it.
#[derive(Debug, Default)]
struct Backup(Option<String>);

impl Backup {
    fn save(&mut self, editor: &Editor) {
        self.0 = Some(editor.text().to_string());
    }

    fn restore(&mut self, editor: &mut Editor) {
        if let Some(text) = self.0.take() {
            editor.set_text(text);
        }
    }
}

#[derive(Debug, Default)]
pub struct CopyCommand;

impl Command for CopyCommand {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn is_undoable(&self) -> bool {
        false
    }

    fn execute(&mut self, workspace: &mut Workspace) -> bool {
        workspace.clipboard = workspace.editor.get_selection();
        tracing::debug!("copy: clipboard now holds {} bytes", workspace.clipboard.len());
        false
    }

    fn undo(&mut self, _workspace: &mut Workspace) {}
}

#[derive(Debug, Default)]
pub struct CutCommand {
    backup: Backup,
}

impl Command for CutCommand {
    fn name(&self) -> &'static str {
        "cut"
    }

    fn execute(&mut self, workspace: &mut Workspace) -> bool {
        self.backup.save(&workspace.editor);
        workspace.clipboard = workspace.editor.get_selection();
        workspace.editor.delete_selection();
        true
    }

    fn undo(&mut self, workspace: &mut Workspace) {
        self.backup.restore(&mut workspace.editor);
    }
}

#[derive(Debug, Default)]
pub struct PasteCommand {
    backup: Backup,
}

impl Command for PasteCommand {
    fn name(&self) -> &'static str {
        "paste"
    }

    fn execute(&mut self, workspace: &mut Workspace) -> bool {
        self.backup.save(&workspace.editor);
        let clipboard = workspace.clipboard.clone();
        workspace.editor.append(&clipboard);
        true
    }

    fn undo(&mut self, workspace: &mut Workspace) {
        self.backup.restore(&mut workspace.editor);
    }
}

#[derive(Default)]
pub struct CommandHistory {
    history: Vec<Box<dyn Command>>,
}

impl CommandHistory {
    pub fn push(&mut self, command: Box<dyn Command>) {
        self.history.push(command);
    }

    pub fn pop(&mut self) -> Option<Box<dyn Command>> {
        self.history.pop()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// The invoker: owns the workspace, the history and the command about to run.
#[derive(Default)]
pub struct Application {
    pub workspace: Workspace,
    history: CommandHistory,
    active_command: Option<Box<dyn Command>>,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editor(&self) -> &Editor {
        &self.workspace.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.workspace.editor
    }

    pub fn clipboard(&self) -> &str {
        &self.workspace.clipboard
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn set_active_command(&mut self, command: Box<dyn Command>) {
        self.active_command = Some(command);
    }

    /// Runs the active command, if any. Returns the name of the command that ran.
    pub fn execute_active_command(&mut self) -> Option<&'static str> {
        let mut command = self.active_command.take()?;
        let name = command.name();
        tracing::debug!("executing command '{}'", name);
        if command.execute(&mut self.workspace) && command.is_undoable() {
            self.history.push(command);
        }
        Some(name)
    }

    /// Undoes the most recent recorded command. Returns its name, `None` when
    /// there was nothing to undo.
    pub fn undo(&mut self) -> Option<&'static str> {
        let mut command = self.history.pop()?;
        command.undo(&mut self.workspace);
        Some(command.name())
    }
}

fn run_step(
    app: &mut Application,
    command: Box<dyn Command>,
    out: &mut dyn Write,
) -> Result<()> {
    app.set_active_command(command);
    if let Some(name) = app.execute_active_command() {
        writeln!(out, "\nExecuting the active command ({})...", name)?;
    }
    writeln!(out, "Current state: {}", app.editor())?;
    Ok(())
}

fn run_undo(app: &mut Application, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n--- Undoing the last operation ---")?;
    match app.undo() {
        Some(name) => writeln!(out, "Undid '{}'. State: {}", name, app.editor())?,
        None => writeln!(out, "Nothing to undo.")?,
    }
    Ok(())
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let mut app = Application::new();
    writeln!(out, "Initial state: {}", app.editor())?;

    // clipboard is still empty, so this paste changes nothing
    run_step(&mut app, Box::new(PasteCommand::default()), out)?;

    app.editor_mut().set_text("Hello World");
    writeln!(out, "\nCurrent state: {}", app.editor())?;
    run_step(&mut app, Box::new(CopyCommand), out)?;
    writeln!(out, "Application clipboard: '{}'", app.clipboard())?;

    run_step(&mut app, Box::new(PasteCommand::default()), out)?;

    run_step(&mut app, Box::new(CutCommand::default()), out)?;
    writeln!(out, "Application clipboard: '{}'", app.clipboard())?;

    run_undo(&mut app, out)?;
    run_undo(&mut app, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_text(text: &str) -> Application {
        let mut app = Application::new();
        app.editor_mut().set_text(text);
        app
    }

    #[test]
    fn test_copy_is_not_recorded() {
        let mut app = app_with_text("Hello");
        app.set_active_command(Box::new(CopyCommand));
        assert_eq!(app.execute_active_command(), Some("copy"));

        assert_eq!(app.clipboard(), "Hello");
        assert!(app.history().is_empty());
        assert_eq!(app.undo(), None);
    }

    #[test]
    fn test_undo_restores_prior_text() {
        let mut app = app_with_text("Hello World");

        app.set_active_command(Box::new(CopyCommand));
        app.execute_active_command();
        app.set_active_command(Box::new(PasteCommand::default()));
        app.execute_active_command();
        assert_eq!(app.editor().text(), "Hello WorldHello World");

        app.set_active_command(Box::new(CutCommand::default()));
        app.execute_active_command();
        assert_eq!(app.editor().text(), "");
        assert_eq!(app.clipboard(), "Hello WorldHello World");

        assert_eq!(app.undo(), Some("cut"));
        assert_eq!(app.editor().text(), "Hello WorldHello World");

        assert_eq!(app.undo(), Some("paste"));
        assert_eq!(app.editor().text(), "Hello World");

        assert_eq!(app.undo(), None);
    }

    #[test]
    fn test_cut_removes_only_the_selection() {
        let mut app = app_with_text("Hello World");
        app.editor_mut().select(5..11).unwrap();

        app.set_active_command(Box::new(CutCommand::default()));
        app.execute_active_command();

        assert_eq!(app.editor().text(), "Hello");
        assert_eq!(app.clipboard(), " World");

        app.undo();
        assert_eq!(app.editor().text(), "Hello World");
    }

    #[test]
    fn test_execute_without_active_command() {
        let mut app = Application::new();
        assert_eq!(app.execute_active_command(), None);
    }

    #[test]
    fn test_select_out_of_bounds_is_rejected() {
        let mut editor = Editor::new();
        editor.set_text("abc");
        assert!(editor.select(1..10).is_err());
        assert!(editor.select(2..1).is_err());
        assert!(editor.select(0..2).is_ok());
        assert_eq!(editor.get_selection(), "ab");
    }

    #[test]
    fn test_demo_output() {
        let mut out = Vec::new();
        run_demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Application clipboard: 'Hello World'"));
        assert!(text.contains("Undid 'cut'. State: Editor(text: 'Hello WorldHello World')"));
        assert!(text.contains("Undid 'paste'. State: Editor(text: 'Hello World')"));
    }
}
