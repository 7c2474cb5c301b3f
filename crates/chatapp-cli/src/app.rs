use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use chatapp_api::{ChatError, Session, parse_max_messages};
use chatapp_types::api::{LoginRequest, RegisterRequest, SendMessageRequest};
use chatapp_types::validation::{self, invalid_registration_fields};

use crate::shell::Shell;
use crate::views;

/// How a run ended. The process exits with status 0 in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// User picked Quit.
    Quit,
    /// User cancelled a prompt.
    Cancelled,
    RegistrationIncomplete,
    LockedOut,
}

enum LoginFlow {
    LoggedIn,
    Cancelled,
    LockedOut,
}

/// Drives registration, login and the main menu through a [`Shell`].
///
/// Nothing partially entered is committed: a cancel at any prompt drops the
/// form being filled in and ends the current flow.
pub struct App<'a, S, R = StdRng> {
    shell: &'a mut S,
    session: Session<R>,
    sample_data: bool,
}

impl<'a, S: Shell, R: Rng> App<'a, S, R> {
    pub fn new(shell: &'a mut S, session: Session<R>, sample_data: bool) -> Self {
        Self {
            shell,
            session,
            sample_data,
        }
    }

    pub fn into_session(self) -> Session<R> {
        self.session
    }

    pub fn run(&mut self) -> Exit {
        self.shell.show_info(views::WELCOME, "Welcome");

        if !self.register() {
            self.shell.show_warning(
                "Registration was not completed successfully.\nApplication will now exit.",
                "Exit",
            );
            return Exit::RegistrationIncomplete;
        }

        match self.login() {
            LoginFlow::LoggedIn => {}
            LoginFlow::Cancelled => return Exit::Cancelled,
            LoginFlow::LockedOut => return Exit::LockedOut,
        }

        self.shell.show_info("Welcome to the ChatApp.", "Welcome");
        let Some(max_messages) = self.prompt_max_messages() else {
            return Exit::Cancelled;
        };

        if self.sample_data {
            if let Err(e) = self.session.seed_sample_data() {
                self.show_failure(&e);
            }
        }

        self.main_menu(max_messages)
    }

    /// Prompts until a non-blank answer; the answer is trimmed.
    fn required(&mut self, message: &str, title: &str, secret: bool) -> Option<String> {
        loop {
            let answer = if secret {
                self.shell.prompt_secret(message, title)?
            } else {
                self.shell.prompt_text(message, title)?
            };
            let answer = answer.trim();
            if !answer.is_empty() {
                return Some(answer.to_string());
            }
            self.shell.show_warning(
                "This field cannot be empty. Please try again.",
                "Invalid Input",
            );
        }
    }

    fn show_failure(&mut self, err: &ChatError) {
        self.shell.show_error(&err.to_string(), "Error");
    }

    // -- Registration --

    fn read_registration(&mut self) -> Option<RegisterRequest> {
        Some(RegisterRequest {
            first_name: self.required("Enter First Name:", "First Name", false)?,
            last_name: self.required("Enter Last Name:", "Last Name", false)?,
            username: self.required(
                "Enter username (must contain '_' and be max 5 characters):",
                "Username",
                false,
            )?,
            password: self.required(
                "Enter Password (min 8 chars, must include: uppercase, lowercase, digit, special character):",
                "Password",
                true,
            )?,
            phone: self.required(
                "Enter Phone Number (format: +27xxxxxxxxx):",
                "Phone Number",
                false,
            )?,
        })
    }

    /// Repeats the form until a registration succeeds. Returns false on cancel.
    fn register(&mut self) -> bool {
        loop {
            self.shell.show_info(views::REGISTRATION_INTRO, "Registration");
            let Some(req) = self.read_registration() else {
                debug!("Registration cancelled");
                return false;
            };

            let invalid = invalid_registration_fields(&req.username, &req.password, &req.phone);
            let results = views::validation_results(&invalid);
            if invalid.is_empty() {
                self.shell.show_info(&results, "Validation Results");
            } else {
                self.shell.show_warning(&results, "Validation Results");
                self.shell.show_error(
                    "Registration Failed!\n\nPlease correct the validation errors and try again.",
                    "Registration Failed",
                );
                continue;
            }

            match self.session.register(&req) {
                Ok(user) => {
                    let text = views::registration_success(
                        &req.display_name(),
                        &user.username,
                        &user.phone,
                    );
                    self.shell.show_info(&text, "Registration Success");
                    return true;
                }
                Err(e) => {
                    self.shell.show_error(
                        &format!("Registration Failed!\n\n{}", e),
                        "Registration Error",
                    );
                }
            }
        }
    }

    // -- Login --

    fn login(&mut self) -> LoginFlow {
        self.shell.show_info(views::LOGIN_INTRO, "Login");

        loop {
            let Some(username) = self.required("Enter username:", "Login - Username", false) else {
                return LoginFlow::Cancelled;
            };
            let Some(password) = self.required("Enter password:", "Login - Password", true) else {
                return LoginFlow::Cancelled;
            };

            match self.session.login(&LoginRequest { username, password }) {
                Ok(login) => {
                    let text = views::login_success(login);
                    self.shell.show_info(&text, "Login Success");
                    return LoginFlow::LoggedIn;
                }
                Err(e @ ChatError::AuthenticationFailed { .. }) => {
                    self.shell.show_error(&format!("Login Failed!\n\n{}", e), "Login Failed");
                }
                Err(e) => {
                    self.shell.show_error(&format!("Login Failed!\n\n{}", e), "Login Locked");
                    return LoginFlow::LockedOut;
                }
            }
        }
    }

    fn prompt_max_messages(&mut self) -> Option<u32> {
        loop {
            let input = self.shell.prompt_text(
                "How many messages would you like to enter?",
                "Set Message Limit",
            )?;
            match parse_max_messages(&input) {
                Ok(n) => return Some(n),
                Err(e) => self.shell.show_error(&e.to_string(), "Error"),
            }
        }
    }

    // -- Menu --

    fn main_menu(&mut self, max_messages: u32) -> Exit {
        loop {
            let Some(choice) = self.shell.prompt_choice(views::MENU, "Main Menu") else {
                return Exit::Cancelled;
            };

            match choice.trim() {
                "1" => {
                    if self.session.is_logged_in() {
                        self.send_batch(max_messages);
                    } else {
                        self.shell
                            .show_error("You must be logged in to send messages.", "Error");
                    }
                }
                "2" => self.show_recent(),
                "3" => self.show_sender_recipients(),
                "4" => self.show_longest(),
                "5" => self.search_by_id(),
                "6" => self.search_by_recipient(),
                "7" => self.delete_by_hash(),
                "8" => self.show_report(),
                "9" => {
                    self.shell.show_info("Goodbye!", "Exit");
                    info!("User quit from the main menu");
                    return Exit::Quit;
                }
                _ => self
                    .shell
                    .show_error("Invalid option. Please enter 1-9.", "Error"),
            }
        }
    }

    /// Sends up to `max` messages. Cancelling any prompt returns to the menu.
    fn send_batch(&mut self, max: u32) {
        let mut sent = 0;
        while sent < max {
            let recipient = loop {
                let prompt = format!(
                    "Enter recipient number (must start with '+' and max 15 characters)\nMessage {} of {}",
                    sent + 1,
                    max
                );
                let Some(answer) = self.shell.prompt_text(&prompt, "Recipient Input") else {
                    return;
                };
                let answer = answer.trim().to_string();
                if validation::is_valid_recipient(&answer) {
                    break answer;
                }
                self.shell
                    .show_error("Invalid recipient number. Please try again.", "Error");
            };

            let body = loop {
                let Some(answer) = self
                    .shell
                    .prompt_text("Enter your message (max 250 characters):", "Message Input")
                else {
                    return;
                };
                if validation::is_valid_message_body(&answer) {
                    break answer;
                }
                self.shell.show_error(
                    "Please enter a message of 250 characters or less.",
                    "Error",
                );
            };

            match self.session.send_message(&SendMessageRequest { recipient, body }) {
                Ok(_) => {
                    self.shell.show_info("Message sent successfully!", "Success");
                    sent += 1;
                }
                Err(e) => {
                    self.show_failure(&e);
                    return;
                }
            }
        }

        self.shell.show_info(
            &format!("All {} messages have been sent successfully!", max),
            "Batch Complete",
        );
    }

    fn show_recent(&mut self) {
        match self.session.recent_messages() {
            Ok(messages) => {
                let text = views::recent_messages(&messages);
                self.shell.show_info(&text, "Recent Messages");
            }
            Err(e) => self.show_failure(&e),
        }
    }

    fn show_sender_recipients(&mut self) {
        match self.session.sender_recipients() {
            Ok(pairs) if pairs.is_empty() => {
                self.shell.show_error("No sent messages to display.", "Error");
            }
            Ok(pairs) => {
                let text = views::sender_recipients(&pairs);
                self.shell.show_info(&text, "Sender/Recipient");
            }
            Err(e) => self.show_failure(&e),
        }
    }

    fn show_longest(&mut self) {
        let text = match self.session.longest_message() {
            Ok(Some(msg)) => views::longest_message(msg),
            Ok(None) => {
                self.shell.show_error("No sent messages to display.", "Error");
                return;
            }
            Err(e) => {
                self.show_failure(&e);
                return;
            }
        };
        self.shell.show_info(&text, "Longest Message");
    }

    fn search_by_id(&mut self) {
        let Some(id) = self.required("Enter Message ID to search:", "Search by ID", false) else {
            return;
        };
        match self.session.find_message(&id) {
            Ok(msg) => {
                let text = views::found_message(msg);
                self.shell.show_info(&text, "Search Result");
            }
            Err(e @ ChatError::NotFound(_)) => {
                self.shell.show_warning(&e.to_string(), "Search Result")
            }
            Err(e) => self.show_failure(&e),
        }
    }

    fn search_by_recipient(&mut self) {
        let Some(recipient) =
            self.required("Enter Recipient to search:", "Search by Recipient", false)
        else {
            return;
        };
        match self.session.messages_to(&recipient) {
            Ok(messages) => {
                let text = views::messages_to(&recipient, &messages);
                self.shell.show_info(&text, "Search Result");
            }
            Err(e) => self.show_failure(&e),
        }
    }

    fn delete_by_hash(&mut self) {
        let Some(hash) = self.required("Enter Message Hash to delete:", "Delete by Hash", false)
        else {
            return;
        };
        match self.session.delete_message(&hash) {
            Ok(()) => self.shell.show_info(
                &format!("Message with hash {} deleted successfully.", hash),
                "Delete Result",
            ),
            Err(e @ ChatError::NotFound(_)) => {
                self.shell.show_warning(&e.to_string(), "Delete Result")
            }
            Err(e) => self.show_failure(&e),
        }
    }

    fn show_report(&mut self) {
        match self.session.report() {
            Ok(entries) if entries.is_empty() => {
                self.shell.show_warning("No sent messages to report.", "Report");
            }
            Ok(entries) => {
                let text = views::report(&entries);
                self.shell.show_info(&text, "Report");
            }
            Err(e) => self.show_failure(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use chatapp_crypto::IdentityHasher;
    use chatapp_db::{MessageStore, UserDirectory, seed};

    const SEED: u64 = 5;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Info,
        Warning,
        Error,
    }

    /// Replays queued answers; an exhausted queue behaves like a cancel.
    #[derive(Default)]
    struct ScriptedShell {
        answers: VecDeque<Option<String>>,
        shown: Vec<(Kind, String, String)>,
        prompts: Vec<String>,
    }

    impl ScriptedShell {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| Some(a.to_string())).collect(),
                ..Self::default()
            }
        }

        fn next(&mut self, message: &str) -> Option<String> {
            self.prompts.push(message.to_string());
            self.answers.pop_front().flatten()
        }

        fn saw(&self, kind: Kind, needle: &str) -> bool {
            self.shown
                .iter()
                .any(|(k, message, _)| *k == kind && message.contains(needle))
        }

        fn titles(&self, kind: Kind) -> Vec<&str> {
            self.shown
                .iter()
                .filter(|(k, _, _)| *k == kind)
                .map(|(_, _, title)| title.as_str())
                .collect()
        }
    }

    impl Shell for ScriptedShell {
        fn prompt_text(&mut self, message: &str, _title: &str) -> Option<String> {
            self.next(message)
        }

        fn prompt_choice(&mut self, menu: &str, _title: &str) -> Option<String> {
            self.next(menu)
        }

        fn show_info(&mut self, message: &str, title: &str) {
            self.shown.push((Kind::Info, message.into(), title.into()));
        }

        fn show_warning(&mut self, message: &str, title: &str) {
            self.shown.push((Kind::Warning, message.into(), title.into()));
        }

        fn show_error(&mut self, message: &str, title: &str) {
            self.shown.push((Kind::Error, message.into(), title.into()));
        }
    }

    const REGISTRATION: [&str; 5] = ["Thabo", "Nkosi", "user_", "Pass123!@", "+27612345678"];
    const LOGIN: [&str; 2] = ["user_", "Pass123!@"];

    fn session() -> Session {
        Session::new(UserDirectory::new(), MessageStore::new(IdentityHasher::seeded(SEED)))
    }

    fn run(shell: &mut ScriptedShell, sample_data: bool) -> (Exit, Session) {
        let mut app = App::new(shell, session(), sample_data);
        let exit = app.run();
        (exit, app.into_session())
    }

    fn script(parts: &[&[&str]]) -> ScriptedShell {
        let answers: Vec<&str> = parts.iter().flat_map(|p| p.iter().copied()).collect();
        ScriptedShell::new(&answers)
    }

    #[test]
    fn register_login_send_quit() {
        let mut shell = script(&[
            &REGISTRATION,
            &LOGIN,
            &["1", "1", " +27831234567 ", "hello", "9"],
        ]);
        let (exit, session) = run(&mut shell, false);
        assert_eq!(exit, Exit::Quit);

        let sent = session.messages().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].number, 1);
        assert_eq!(sent[0].recipient, "+27831234567");
        assert_eq!(sent[0].hash.len(), 64);

        assert!(shell.saw(Kind::Info, "Registration Successful!"));
        assert!(shell.saw(Kind::Info, "Welcome back, Thabo Nkosi!"));
        assert!(shell.saw(Kind::Info, "All 1 messages have been sent successfully!"));
        assert!(shell.saw(Kind::Info, "Goodbye!"));
    }

    #[test]
    fn cancel_during_registration_commits_nothing() {
        let mut shell = script(&[&["Thabo", "Nkosi", "user_"]]);
        let (exit, session) = run(&mut shell, false);
        assert_eq!(exit, Exit::RegistrationIncomplete);
        assert!(session.users().is_empty());
        assert!(shell.saw(Kind::Warning, "Registration was not completed successfully."));
    }

    #[test]
    fn blank_answers_are_reprompted() {
        let mut shell = script(&[&["   ", "Thabo", "Nkosi", "user_", "Pass123!@", "+27612345678"]]);
        let (exit, session) = run(&mut shell, false);
        assert_eq!(exit, Exit::Cancelled);
        assert_eq!(session.users().len(), 1);
        assert!(shell.saw(Kind::Warning, "This field cannot be empty."));
    }

    #[test]
    fn invalid_registration_repeats_the_form() {
        let mut shell = script(&[
            &["Thabo", "Nkosi", "user", "Pass123!@", "+27512345678"],
            &REGISTRATION,
        ]);
        let (exit, session) = run(&mut shell, false);
        assert_eq!(exit, Exit::Cancelled);
        assert_eq!(session.users().len(), 1);
        assert!(shell.saw(Kind::Warning, "✗ Username: Invalid"));
        assert!(shell.saw(Kind::Warning, "✗ Phone Number: Invalid"));
        assert!(shell.saw(Kind::Error, "Please correct the validation errors"));
        assert!(shell.saw(Kind::Info, "✓ Password: Valid"));
    }

    #[test]
    fn three_bad_logins_lock_out() {
        let mut shell = script(&[
            &REGISTRATION,
            &["user_", "Wrong123!@", "user_", "Wrong123!@", "user_", "Wrong123!@"],
            &LOGIN,
        ]);
        let (exit, session) = run(&mut shell, false);
        assert_eq!(exit, Exit::LockedOut);
        assert!(!session.is_logged_in());
        assert!(shell.saw(Kind::Error, "Attempts remaining: 2"));
        assert!(shell.saw(Kind::Error, "Attempts remaining: 1"));
        assert_eq!(shell.titles(Kind::Error), vec!["Login Failed", "Login Failed", "Login Locked"]);
        // The correct credentials queued after the lockout were never read.
        assert_eq!(shell.answers.len(), 2);
    }

    #[test]
    fn cancel_at_message_limit_exits() {
        let mut shell = script(&[&REGISTRATION, &LOGIN, &["abc", "0"]]);
        let (exit, session) = run(&mut shell, true);
        assert_eq!(exit, Exit::Cancelled);
        assert!(shell.saw(Kind::Error, "Invalid number. Try again."));
        assert!(shell.saw(Kind::Error, "Please enter a positive number."));
        // Sample data is only loaded once a limit is set.
        assert_eq!(session.messages().counter(), 0);
    }

    #[test]
    fn invalid_recipient_and_long_body_are_reprompted() {
        let long = "x".repeat(251);
        let mut shell = script(&[
            &REGISTRATION,
            &LOGIN,
            &["2", "1", "0831234567", "+27831234567", long.as_str(), "ok"],
        ]);
        let (exit, session) = run(&mut shell, false);
        // Cancelled on the second recipient prompt of the batch.
        assert_eq!(exit, Exit::Cancelled);
        assert_eq!(session.messages().sent().len(), 1);
        assert!(shell.saw(Kind::Error, "Invalid recipient number."));
        assert!(shell.saw(Kind::Error, "250 characters or less"));
        assert!(shell.prompts.iter().any(|p| p.ends_with("Message 2 of 2")));
        assert!(!shell.saw(Kind::Info, "All 2 messages"));
    }

    #[test]
    fn menu_over_sample_data() {
        let mut expected = MessageStore::new(IdentityHasher::seeded(SEED));
        seed::run(&mut expected);
        let cake = expected.sent()[0].clone();

        let mut shell = script(&[
            &REGISTRATION,
            &LOGIN,
            &[
                "5",
                "2",
                "3",
                "4",
                "5",
                cake.id.as_str(),
                "6",
                "Developer",
                "7",
                "deadbeef",
                "7",
                cake.hash.as_str(),
                "8",
                "2",
            ],
        ]);
        let (exit, session) = run(&mut shell, true);
        assert_eq!(exit, Exit::Cancelled);

        assert!(shell.saw(Kind::Info, "Recent Messages (2 total)"));
        assert!(shell.saw(Kind::Info, "Sender: user_ | Recipient: Developer"));
        assert!(shell.saw(Kind::Info, "Longest Message:\n\nRecipient: +27834567896"));
        assert!(shell.saw(
            Kind::Info,
            "Found:\nRecipient: +27834567896\nMessage: Did you get the cake?"
        ));
        assert!(shell.saw(Kind::Info, "Message: It is dinner time!"));
        assert!(shell.saw(Kind::Warning, "Message hash not found."));
        assert!(shell.saw(Kind::Info, "deleted successfully."));
        assert!(shell.saw(Kind::Info, "Recent Messages (1 total)"));

        let messages = session.messages();
        assert_eq!(messages.sent().len(), 1);
        assert_eq!(messages.stored().len(), 2);
        assert_eq!(messages.disregarded().len(), 1);
    }

    #[test]
    fn empty_store_views() {
        let mut shell = script(&[
            &REGISTRATION,
            &LOGIN,
            &["1", "2", "3", "4", "8", "x", "5", "123"],
        ]);
        let (exit, session) = run(&mut shell, false);
        assert_eq!(exit, Exit::Cancelled);
        assert_eq!(session.messages().counter(), 0);
        assert!(session.is_logged_in());

        assert!(shell.saw(Kind::Info, "No messages sent yet."));
        assert!(shell.saw(Kind::Error, "No sent messages to display."));
        assert!(shell.saw(Kind::Warning, "No sent messages to report."));
        assert!(shell.saw(Kind::Error, "Invalid option. Please enter 1-9."));
        assert!(shell.saw(Kind::Warning, "Message ID not found."));
    }
}
