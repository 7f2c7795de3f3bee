// Integration tests for the tape interpreter

use tapestep::device::BufferDevice;
use tapestep::dialect::DialectLevel;
use tapestep::interpreter::engine::{execute, execute_with, Config, Interpreter};
use tapestep::interpreter::errors::{Error, RuntimeError, SyntaxError};
use tapestep::memory::register::RegisterMode;

/// Load and run `source`, returning the interpreter for inspection
fn run_at(source: &str, config: Config, device: &mut BufferDevice) -> Interpreter {
    let mut interpreter = Interpreter::new(config);
    interpreter.load(source).expect("Loading failed");
    interpreter.run(device).expect("Execution failed");
    interpreter
}

#[test]
fn test_increment_and_output() {
    let mut device = BufferDevice::new();
    let outcome = execute("++.", DialectLevel::Base, &mut device).expect("Execution failed");

    assert_eq!(device.output(), &[2]);
    assert_eq!(outcome.cycles, 3);
    assert!(!outcome.halted);
}

#[test]
fn test_clear_loop() {
    let mut device = BufferDevice::new();
    let interpreter = run_at("+[-]", Config::for_level(DialectLevel::Base), &mut device);

    // `+`, `[`, `-`, `]`
    assert_eq!(interpreter.cycles(), 4);
    assert_eq!(interpreter.tape().cells()[0], 0);
    assert!(interpreter.loop_stack().is_empty());
    assert!(device.output().is_empty());
}

#[test]
fn test_loop_body_runs_until_cell_is_zero() {
    let mut device = BufferDevice::new();
    let interpreter = run_at(
        "+++[>++<-]>.",
        Config::for_level(DialectLevel::Base),
        &mut device,
    );

    assert_eq!(device.output(), &[6]);
    assert_eq!(interpreter.tape().cells()[0], 0);
    assert!(interpreter.loop_stack().is_empty());
}

#[test]
fn test_increments_minus_decrements() {
    for (n, m) in [(0, 0), (5, 3), (3, 5), (300, 0), (0, 257), (256, 256)] {
        let source = format!("{}{}.", "+".repeat(n), "-".repeat(m));
        let mut device = BufferDevice::new();
        execute(&source, DialectLevel::Base, &mut device).expect("Execution failed");

        let expected = (n as i64 - m as i64).rem_euclid(256) as u8;
        assert_eq!(device.output(), &[expected], "{} increments, {} decrements", n, m);
    }
}

#[test]
fn test_cursor_wraps_both_ways() {
    let config = Config::for_level(DialectLevel::Base).with_tape_length(4);

    let mut device = BufferDevice::new();
    let interpreter = run_at("<+", config, &mut device);
    assert_eq!(interpreter.tape().cursor(), 3);
    assert_eq!(interpreter.tape().cells(), &[0, 0, 0, 1]);

    let interpreter = run_at(">>>>++", config, &mut device);
    assert_eq!(interpreter.tape().cursor(), 0);
    assert_eq!(interpreter.tape().cells(), &[2, 0, 0, 0]);
}

#[test]
fn test_unknown_symbols_are_ignored() {
    let mut device = BufferDevice::new();
    let outcome = execute("a+ b+\n c.", DialectLevel::Base, &mut device).expect("Execution failed");

    assert_eq!(device.output(), &[2]);
    assert_eq!(outcome.cycles, 3);
}

#[test]
fn test_hello_world_demo() {
    let source = std::fs::read_to_string("demos/hello_world.b").expect("Failed to read demo file");
    let config = Config::for_level(DialectLevel::Base).with_tape_length(32);

    let mut device = BufferDevice::new();
    execute_with(&source, config, &mut device).expect("Execution failed");

    assert_eq!(device.output_string(), "Hello World!\n");
}

#[test]
fn test_hello_world_runs_unchanged_at_every_level() {
    let source = std::fs::read_to_string("demos/hello_world.b").expect("Failed to read demo file");

    for level in DialectLevel::ALL {
        let mut device = BufferDevice::new();
        execute(&source, level, &mut device).expect("Execution failed");
        assert_eq!(device.output_string(), "Hello World!\n", "level {}", level);
    }
}

// ========== Syntax errors ==========

#[test]
fn test_unclosed_open_is_rejected() {
    let mut device = BufferDevice::new();
    let result = execute("[", DialectLevel::Base, &mut device);

    match result {
        Err(Error::Syntax(SyntaxError::UnclosedOpen { count, location })) => {
            assert_eq!(count, 1);
            assert_eq!((location.line, location.column), (1, 1));
        }
        other => panic!("Expected UnclosedOpen, got {:?}", other),
    }
    assert!(device.output().is_empty());
}

#[test]
fn test_unexpected_close_is_rejected() {
    let mut device = BufferDevice::new();
    let result = execute("+.\n+]", DialectLevel::Base, &mut device);

    match result {
        Err(Error::Syntax(SyntaxError::UnexpectedClose { location })) => {
            assert_eq!((location.line, location.column), (2, 2));
        }
        other => panic!("Expected UnexpectedClose, got {:?}", other),
    }
    // Nothing ran
    assert!(device.output().is_empty());
}

#[test]
fn test_unvalidated_close_underflows_at_runtime() {
    let config = Config::for_level(DialectLevel::Base).with_validation(false);
    let mut device = BufferDevice::new();
    let result = execute_with("+]", config, &mut device);

    // `]` on a non-zero cell needs a loop to return to
    match result {
        Err(Error::Runtime(RuntimeError::LoopStackUnderflow { location })) => {
            assert_eq!(location.ip, 1);
            assert_eq!(location.symbol, ']');
        }
        other => panic!("Expected LoopStackUnderflow, got {:?}", other),
    }
}

// ========== Level 1 ==========

#[test]
fn test_store_then_output() {
    let mut device = BufferDevice::new();
    let interpreter = run_at("+++$.", Config::for_level(DialectLevel::Extended1), &mut device);

    assert_eq!(device.output(), &[3]);
    assert_eq!(interpreter.register().accumulator(), 3);
}

#[test]
fn test_load_copies_register() {
    let mut device = BufferDevice::new();
    run_at("+++++$>!.", Config::for_level(DialectLevel::Extended1), &mut device);

    assert_eq!(device.output(), &[5]);
}

#[test]
fn test_bitwise_with_register() {
    let mut device = BufferDevice::new();
    run_at(
        "++++++$>+++&.>+++^.>+++|.",
        Config::for_level(DialectLevel::Extended1),
        &mut device,
    );

    // 3 & 6, 3 ^ 6, 3 | 6
    assert_eq!(device.output(), &[2, 5, 7]);
}

#[test]
fn test_shifts_and_not() {
    let mut device = BufferDevice::new();
    run_at(
        "+++}.>+{{{{{{{{.>~.>+++++{{{{{{.",
        Config::for_level(DialectLevel::Extended1),
        &mut device,
    );

    // 3 >> 1, 1 << 8 wraps to 0, !0, 5 << 6 mod 256
    assert_eq!(device.output(), &[1, 0, 255, 64]);
}

#[test]
fn test_halt_stops_execution() {
    let mut device = BufferDevice::new();
    let outcome = execute("+.@+.", DialectLevel::Extended1, &mut device).expect("Execution failed");

    assert_eq!(device.output(), &[1]);
    assert!(outcome.halted);
    assert_eq!(outcome.cycles, 3);
}

#[test]
fn test_halt_with_payload_delimiter() {
    // From level 2 on, the last `@` starts the payload
    let mut device = BufferDevice::new();
    let outcome = execute("+.@+.@", DialectLevel::Extended2, &mut device).expect("Execution failed");

    assert_eq!(device.output(), &[1]);
    assert!(outcome.halted);
}

// ========== Level 2 ==========

#[test]
fn test_payload_seeds_tape() {
    let mut interpreter = Interpreter::new(Config::for_level(DialectLevel::Extended2));
    interpreter.load("@AB").expect("Loading failed");

    assert!(interpreter.program().is_empty());
    assert_eq!(&interpreter.tape().cells()[..3], &[65, 66, 0]);

    let outcome = interpreter
        .run(&mut BufferDevice::new())
        .expect("Execution failed");
    assert_eq!(outcome.cycles, 0);
}

#[test]
fn test_payload_demo() {
    let source = std::fs::read_to_string("demos/payload.b").expect("Failed to read demo file");
    let mut device = BufferDevice::new();
    execute(&source, DialectLevel::Extended2, &mut device).expect("Execution failed");

    assert_eq!(device.output_string(), "Hi!\n");
}

#[test]
fn test_payload_is_plain_code_below_level_two() {
    let mut device = BufferDevice::new();
    let interpreter = run_at("@AB", Config::for_level(DialectLevel::Extended1), &mut device);

    // `@` halts, the letters are not commands
    assert!(interpreter.is_halted());
    assert_eq!(interpreter.tape().cells()[0], 0);
}

#[test]
fn test_oversized_payload_is_truncated() {
    let config = Config::for_level(DialectLevel::Extended2).with_tape_length(2);
    let mut interpreter = Interpreter::new(config);
    interpreter.load(".@xyz").expect("Loading failed");

    assert_eq!(interpreter.tape().cells(), b"xy");
}

#[test]
fn test_jump_to_register() {
    let mut device = BufferDevice::new();
    let interpreter = run_at(
        "+++++++{$?-----.+.",
        Config::for_level(DialectLevel::Extended2),
        &mut device,
    );

    // Register 14 lands on the last `-`
    assert_eq!(device.output(), &[13, 14]);
    assert_eq!(interpreter.cycles(), 14);
}

#[test]
fn test_jump_with_zero_register_ends_program() {
    let mut device = BufferDevice::new();
    let outcome = execute("?+.", DialectLevel::Extended2, &mut device).expect("Execution failed");

    assert!(device.output().is_empty());
    assert_eq!(outcome.cycles, 1);
}

#[test]
fn test_insert_and_remove_cells() {
    let config = Config::for_level(DialectLevel::Extended2).with_tape_length(4);
    let mut device = BufferDevice::new();

    let interpreter = run_at("+>++>+++>)", config, &mut device);
    assert_eq!(interpreter.tape().cells(), &[1, 2, 3, 0, 0]);
    assert_eq!(interpreter.tape().cursor(), 3);

    // Removing the last cell re-wraps the cursor onto the shorter tape
    let interpreter = run_at("+>++>+++>(", config, &mut device);
    assert_eq!(interpreter.tape().cells(), &[1, 2, 3]);
    assert_eq!(interpreter.tape().cursor(), 0);
}

#[test]
fn test_cursor_wraps_with_current_length() {
    let config = Config::for_level(DialectLevel::Extended2).with_tape_length(3);
    let mut device = BufferDevice::new();

    let interpreter = run_at("))<+", config, &mut device);
    assert_eq!(interpreter.tape().len(), 5);
    assert_eq!(interpreter.tape().cursor(), 4);
    assert_eq!(interpreter.tape().cells()[4], 1);
}

#[test]
fn test_remove_on_empty_tape_is_fatal() {
    let config = Config::for_level(DialectLevel::Extended2).with_tape_length(1);
    let mut device = BufferDevice::new();
    let result = execute_with("((", config, &mut device);

    match result {
        Err(Error::Runtime(RuntimeError::EmptyTape { location, .. })) => {
            assert_eq!(location.ip, 1);
        }
        other => panic!("Expected EmptyTape, got {:?}", other),
    }
}

#[test]
fn test_insert_on_empty_tape_is_fatal() {
    let config = Config::for_level(DialectLevel::Extended2).with_tape_length(1);
    let mut device = BufferDevice::new();
    let result = execute_with("()+.", config, &mut device);

    match result {
        Err(Error::Runtime(RuntimeError::EmptyTape { location, .. })) => {
            assert_eq!(location.ip, 1);
            assert_eq!(location.symbol, ')');
        }
        other => panic!("Expected EmptyTape, got {:?}", other),
    }
    assert!(device.output().is_empty());
}

#[test]
fn test_register_arithmetic() {
    let mut device = BufferDevice::new();
    run_at(
        "+++$>+++++++*.>+++++++/.>+++++++%.>+++++++=.",
        Config::for_level(DialectLevel::Extended2),
        &mut device,
    );

    // 7 * 3, 7 / 3, 7 % 3, 7 + 3
    assert_eq!(device.output(), &[21, 2, 1, 10]);
}

#[test]
fn test_arithmetic_wraps_to_non_negative() {
    let mut device = BufferDevice::new();
    run_at(
        "+$>_.>++++++++++++++++$>++++++++++++++++*.",
        Config::for_level(DialectLevel::Extended2),
        &mut device,
    );

    // 0 - 1 and 16 * 16
    assert_eq!(device.output(), &[255, 0]);
}

#[test]
fn test_division_by_zero_is_fatal() {
    for (source, operation) in [("++/.", "Division"), ("++%.", "Modulo")] {
        let mut interpreter = Interpreter::new(Config::for_level(DialectLevel::Extended2));
        interpreter.load(source).expect("Loading failed");

        let mut device = BufferDevice::new();
        match interpreter.run(&mut device) {
            Err(RuntimeError::DivisionByZero {
                operation: op,
                location,
            }) => {
                assert_eq!(op, operation);
                assert_eq!(location.ip, 2);
                assert_eq!(location.source.column, 3);
            }
            other => panic!("Expected DivisionByZero, got {:?}", other),
        }

        // The two increments ran, the failing step did not count
        assert_eq!(interpreter.cycles(), 2);
        assert_eq!(interpreter.tape().cells()[0], 2);
        assert!(device.output().is_empty());
    }
}

// ========== Level 3 ==========

#[test]
fn test_redirected_register_goes_through_tape() {
    let mut device = BufferDevice::new();
    let interpreter = run_at(
        ">:<+++++$>.",
        Config::for_level(DialectLevel::Extended3),
        &mut device,
    );

    assert_eq!(device.output(), &[5]);
    assert_eq!(interpreter.register().mode(), RegisterMode::Indirect(1));
    assert_eq!(interpreter.register().accumulator(), 0);
}

#[test]
fn test_clear_redirect_restores_accumulator() {
    let mut device = BufferDevice::new();
    let interpreter = run_at(
        ">:<+++++$;++$>.",
        Config::for_level(DialectLevel::Extended3),
        &mut device,
    );

    // The cell keeps what was stored through it
    assert_eq!(device.output(), &[5]);
    assert_eq!(interpreter.register().mode(), RegisterMode::Accumulator);
    assert_eq!(interpreter.register().accumulator(), 7);
}

#[test]
fn test_redirected_arithmetic_and_jump() {
    let mut device = BufferDevice::new();
    run_at(
        "+++++:>++=.",
        Config::for_level(DialectLevel::Extended3),
        &mut device,
    );

    // Register aliases cell 0 (5); `=` adds it to cell 1
    assert_eq!(device.output(), &[7]);

    let mut device = BufferDevice::new();
    run_at(
        "1:?-------------.",
        Config::for_level(DialectLevel::Extended3),
        &mut device,
    );

    // Jump target 16 read through the redirected register skips the `-`s
    assert_eq!(device.output(), &[16]);
}

#[test]
fn test_redirected_register_follows_inserted_cells() {
    let mut device = BufferDevice::new();
    let interpreter = run_at(
        ">+++:<)!.",
        Config::for_level(DialectLevel::Extended3),
        &mut device,
    );

    // The cell holding 3 moved from index 1 to 2 and the alias moved with it
    assert_eq!(device.output(), &[3]);
    assert_eq!(interpreter.register().mode(), RegisterMode::Indirect(2));
}

#[test]
fn test_literals() {
    let mut device = BufferDevice::new();
    run_at("F.>3+.>0.", Config::for_level(DialectLevel::Extended3), &mut device);

    assert_eq!(device.output(), &[240, 49, 0]);
}

#[test]
fn test_literals_are_ignored_below_level_three() {
    let mut device = BufferDevice::new();
    let outcome = execute("F+.", DialectLevel::Extended2, &mut device).expect("Execution failed");

    assert_eq!(device.output(), &[1]);
    assert_eq!(outcome.cycles, 2);
}

#[test]
fn test_digits_demo() {
    let source = std::fs::read_to_string("demos/digits.b").expect("Failed to read demo file");
    let mut device = BufferDevice::new();
    execute(&source, DialectLevel::Extended3, &mut device).expect("Execution failed");

    assert_eq!(device.output_string(), "0123456789\n");
}

#[test]
fn test_reserved_symbols_are_counted_no_ops() {
    let mut device = BufferDevice::new();
    let interpreter = run_at("XxM#+.", Config::for_level(DialectLevel::Extended3), &mut device);

    assert_eq!(device.output(), &[1]);
    assert_eq!(interpreter.cycles(), 6);
    assert_eq!(interpreter.tape().cursor(), 0);
}

// ========== Input ==========

#[test]
fn test_input_takes_first_byte_of_each_line() {
    let mut device = BufferDevice::with_input(["hi", ""]);
    execute(",.,.,.", DialectLevel::Base, &mut device).expect("Execution failed");

    // First byte, empty line as newline, end of input as 0
    assert_eq!(device.output(), b"h\n\0");
}

#[test]
fn test_echo_demo() {
    let source = std::fs::read_to_string("demos/echo.b").expect("Failed to read demo file");
    let mut device = BufferDevice::with_input(["abc", "de", "f"]);
    execute(&source, DialectLevel::Base, &mut device).expect("Execution failed");

    assert_eq!(device.output_string(), "adf");
}

// ========== Reset ==========

#[test]
fn test_reset_reproduces_run() {
    let source = "++>+++[<+>-]<.@xy";
    let config = Config::for_level(DialectLevel::Extended3);
    let mut interpreter = Interpreter::new(config);
    interpreter.load(source).expect("Loading failed");
    let initial = interpreter.machine().clone();

    let mut first = BufferDevice::new();
    let outcome_first = interpreter.run(&mut first).expect("Execution failed");
    let final_first = interpreter.machine().clone();

    interpreter.reset();
    assert_eq!(interpreter.machine(), &initial);
    assert_eq!(interpreter.cycles(), 0);
    assert_eq!(interpreter.ip(), 0);

    let mut second = BufferDevice::new();
    let outcome_second = interpreter.run(&mut second).expect("Execution failed");

    assert_eq!(outcome_first, outcome_second);
    assert_eq!(first.output(), second.output());
    assert_eq!(interpreter.machine(), &final_first);
}

#[test]
fn test_step_after_end_does_nothing() {
    let mut interpreter = Interpreter::new(Config::for_level(DialectLevel::Base));
    interpreter.load("+").expect("Loading failed");

    let mut device = BufferDevice::new();
    assert!(interpreter.step(&mut device).expect("Step failed"));
    assert!(interpreter.is_finished());
    assert!(!interpreter.step(&mut device).expect("Step failed"));
    assert_eq!(interpreter.cycles(), 1);
}
